#![allow(dead_code)]

use launchpad::models::{Post, PostStatus, Profile, Startup, StartupStatus};
use time::OffsetDateTime;

pub fn at(unix: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(unix).unwrap()
}

pub fn profile(id: &str, username: &str) -> Profile {
    Profile {
        id: id.to_owned(),
        username: username.to_owned(),
        full_name: Some(format!("{username} full name")),
        avatar_url: Some(format!("https://cdn.example/{username}.png")),
        bio: None,
        created_at: Some(at(1_600_000_000)),
    }
}

pub fn startup(id: &str, user_id: &str, name: &str) -> Startup {
    Startup {
        id: id.to_owned(),
        user_id: user_id.to_owned(),
        name: name.to_owned(),
        description: None,
        website_url: None,
        status: StartupStatus::Approved,
        created_at: at(1_700_000_000),
        views_count: None,
        likes_count: None,
        startup_likes: None,
    }
}

pub fn post(id: &str, user_id: &str, title: &str, slug: Option<&str>) -> Post {
    Post {
        id: id.to_owned(),
        user_id: user_id.to_owned(),
        title: title.to_owned(),
        slug: slug.map(str::to_owned),
        status: PostStatus::Published,
        body: format!("body of {title}"),
        created_at: Some(at(1_700_000_000)),
    }
}
