use std::{collections::HashSet, sync::{Mutex, MutexGuard}};

use async_trait::async_trait;

use crate::models::{Post, PostStatus, Profile, ProfileSummary, Startup, StartupStatus, StartupView};

use super::{Store, StoreError, StoreResult};

/// Names a [`Store`] operation so `MemoryStore` can be told to fail it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    ProfileByUsername,
    ProfileSummary,
    ApprovedStartups,
    ApprovedStartupsByOwner,
    InsertStartupView,
    SetStartupViews,
    PublishedPostBySlug,
    PublishedPosts,
    SetPostSlug,
}

#[derive(Default)]
struct Tables {
    profiles: Vec<Profile>,
    startups: Vec<Startup>,
    startup_views: Vec<StartupView>,
    startup_likes: Vec<String>,
    posts: Vec<Post>,
    failing: HashSet<StoreOp>,
}

/// In-process store. Rows come back in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(tables: &Tables, op: StoreOp) -> StoreResult<()> {
        if tables.failing.contains(&op) {
            return Err(StoreError::Unavailable(format!("{op:?} failed")));
        }
        Ok(())
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        self.tables().profiles.push(profile);
        self
    }

    pub fn with_startup(self, startup: Startup) -> Self {
        self.tables().startups.push(startup);
        self
    }

    /// One `startup_likes` row for `startup_id`.
    pub fn with_like(self, startup_id: &str) -> Self {
        self.tables().startup_likes.push(startup_id.to_owned());
        self
    }

    pub fn with_post(self, post: Post) -> Self {
        self.tables().posts.push(post);
        self
    }

    pub fn failing(self, op: StoreOp) -> Self {
        self.tables().failing.insert(op);
        self
    }

    pub fn startup(&self, id: &str) -> Option<Startup> {
        self.tables().startups.iter().find(|s| s.id == id).cloned()
    }

    pub fn post(&self, id: &str) -> Option<Post> {
        self.tables().posts.iter().find(|p| p.id == id).cloned()
    }

    pub fn startup_views(&self) -> Vec<StartupView> {
        self.tables().startup_views.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn profile_by_username(&self, username: &str) -> StoreResult<Profile> {
        let tables = self.tables();
        Self::check(&tables, StoreOp::ProfileByUsername)?;
        tables.profiles.iter()
            .find(|p| p.username == username)
            .cloned()
            .ok_or(StoreError::NoRows)
    }

    async fn profile_summary(&self, profile_id: &str) -> StoreResult<ProfileSummary> {
        let tables = self.tables();
        Self::check(&tables, StoreOp::ProfileSummary)?;
        tables.profiles.iter()
            .find(|p| p.id == profile_id)
            .map(ProfileSummary::from)
            .ok_or(StoreError::NoRows)
    }

    async fn approved_startups(&self) -> StoreResult<Vec<Startup>> {
        let tables = self.tables();
        Self::check(&tables, StoreOp::ApprovedStartups)?;
        Ok(
            tables.startups.iter()
                .filter(|s| s.status == StartupStatus::Approved)
                .cloned()
                .collect()
        )
    }

    async fn approved_startups_by_owner(&self, user_id: &str) -> StoreResult<Vec<Startup>> {
        let tables = self.tables();
        Self::check(&tables, StoreOp::ApprovedStartupsByOwner)?;
        let mut startups: Vec<Startup> = tables.startups.iter()
            .filter(|s| s.user_id == user_id && s.status == StartupStatus::Approved)
            .map(|s| {
                let likes = tables.startup_likes.iter().filter(|id| **id == s.id).count();
                Startup {
                    startup_likes: Some(likes as i64),
                    ..s.clone()
                }
            })
            .collect();
        startups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(startups)
    }

    async fn insert_startup_view(&self, view: &StartupView) -> StoreResult<()> {
        let mut tables = self.tables();
        Self::check(&tables, StoreOp::InsertStartupView)?;
        tables.startup_views.push(view.clone());
        Ok(())
    }

    async fn set_startup_views(&self, startup_id: &str, views_count: i64) -> StoreResult<()> {
        let mut tables = self.tables();
        Self::check(&tables, StoreOp::SetStartupViews)?;
        for startup in tables.startups.iter_mut().filter(|s| s.id == startup_id) {
            startup.views_count = Some(views_count);
        }
        Ok(())
    }

    async fn published_post_by_slug(&self, slug: &str) -> StoreResult<Post> {
        let tables = self.tables();
        Self::check(&tables, StoreOp::PublishedPostBySlug)?;
        tables.posts.iter()
            .find(|p| p.status == PostStatus::Published && p.slug.as_deref() == Some(slug))
            .cloned()
            .ok_or(StoreError::NoRows)
    }

    async fn published_posts(&self) -> StoreResult<Vec<Post>> {
        let tables = self.tables();
        Self::check(&tables, StoreOp::PublishedPosts)?;
        Ok(
            tables.posts.iter()
                .filter(|p| p.status == PostStatus::Published)
                .cloned()
                .collect()
        )
    }

    async fn set_post_slug(&self, post_id: &str, slug: &str) -> StoreResult<()> {
        let mut tables = self.tables();
        Self::check(&tables, StoreOp::SetPostSlug)?;
        for post in tables.posts.iter_mut().filter(|p| p.id == post_id) {
            post.slug = Some(slug.to_owned());
        }
        Ok(())
    }
}
