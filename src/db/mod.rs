//! Data access for the page loaders.
//!
//! Loaders only ever talk to a [`Store`]; `SqliteStore` backs the running
//! service and `MemoryStore` (feature `test-util`) backs tests.

#[cfg(any(test, feature = "test-util"))]
mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::models::{Post, Profile, ProfileSummary, Startup, StartupView};

#[cfg(any(test, feature = "test-util"))]
pub use memory::{MemoryStore, StoreOp};
pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A single-row lookup matched nothing.
    #[error("no rows returned")]
    NoRows,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Injected by the in-memory test store.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_no_rows(&self) -> bool {
        matches!(self, StoreError::NoRows)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NoRows,
            err => StoreError::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn profile_by_username(&self, username: &str) -> StoreResult<Profile>;

    async fn profile_summary(&self, profile_id: &str) -> StoreResult<ProfileSummary>;

    /// Every approved startup, in whatever order the store yields them.
    async fn approved_startups(&self) -> StoreResult<Vec<Startup>>;

    /// Approved startups owned by `user_id`, newest first.
    async fn approved_startups_by_owner(&self, user_id: &str) -> StoreResult<Vec<Startup>>;

    async fn insert_startup_view(&self, view: &StartupView) -> StoreResult<()>;

    async fn set_startup_views(&self, startup_id: &str, views_count: i64) -> StoreResult<()>;

    async fn published_post_by_slug(&self, slug: &str) -> StoreResult<Post>;

    /// Every published post, in whatever order the store yields them.
    async fn published_posts(&self) -> StoreResult<Vec<Post>>;

    async fn set_post_slug(&self, post_id: &str, slug: &str) -> StoreResult<()>;
}
