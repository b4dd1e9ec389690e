use axum::{debug_handler, extract::{Path, State}, Json};
use serde::Serialize;

use crate::{
    db::Store,
    events::{best_effort, EventLog},
    models::{Post, ProfileSummary},
    profiles::embedded_summary,
    slug::derive_slug,
    AppState, Db, Events,
};

#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub post: Option<PostWithAuthor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    #[serde(rename = "profiles")]
    pub author: Option<ProfileSummary>,
}

/// Finds the published post behind `slug`.
///
/// Falls back to matching `slug` against slugs derived from every published
/// title, and backfills the stored slug of a post found that way. When two
/// titles derive the same slug the store's row order decides, which is not
/// guaranteed to be stable.
///
/// Every failure degrades to `post: None`.
pub async fn resolve_post(store: &dyn Store, events: &dyn EventLog, slug: &str) -> PostPage {
    tracing::debug!(slug, "loading post");

    let post = match store.published_post_by_slug(slug).await {
        Ok(post) => Some(post),
        Err(err) if err.is_no_rows() => match_derived_slug(store, events, slug).await,
        Err(err) => {
            events.record("post_lookup_failed", &err.to_string());
            None
        }
    };

    let Some(post) = post else {
        return PostPage { post: None };
    };

    let author = embedded_summary(store, events, "post_author_failed", &post.user_id).await;

    PostPage {
        post: Some(PostWithAuthor { post, author }),
    }
}

async fn match_derived_slug(store: &dyn Store, events: &dyn EventLog, slug: &str) -> Option<Post> {
    tracing::debug!(slug, "no post with this slug, matching on titles");

    let posts = best_effort(events, "post_fallback_failed", store.published_posts()).await?;
    let mut post = posts.into_iter().find(|p| derive_slug(&p.title) == slug)?;

    if post.slug.as_deref() != Some(slug) {
        tracing::debug!(post_id = %post.id, slug, "backfilling post slug");
        best_effort(events, "post_slug_backfill_failed", store.set_post_slug(&post.id, slug)).await;
        post.slug = Some(slug.to_owned());
    }

    Some(post)
}

#[debug_handler(state = AppState)]
pub(crate) async fn post(
    Path(slug): Path<String>,
    State(store): State<Db>,
    State(events): State<Events>,
) -> Json<PostPage> {
    Json(resolve_post(store.as_ref(), events.as_ref(), &slug).await)
}
