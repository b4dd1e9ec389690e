use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::{Post, PostStatus, Profile, ProfileSummary, Startup, StartupStatus, StartupView};

use super::{Store, StoreResult};

const STARTUP_COLUMNS: &str =
    "id,user_id,name,description,website_url,status,created_at,views_count,likes_count";
const POST_COLUMNS: &str = "id,user_id,title,slug,status,body,created_at";

#[derive(Clone)]
pub struct SqliteStore {
    db_pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn pool(&self) -> &SqlitePool {
        &self.db_pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn profile_by_username(&self, username: &str) -> StoreResult<Profile> {
        Ok(
            sqlx::query_as("SELECT id,username,full_name,avatar_url,bio,created_at FROM profiles WHERE username=?")
                .bind(username)
                .fetch_one(&self.db_pool)
                .await?
        )
    }

    async fn profile_summary(&self, profile_id: &str) -> StoreResult<ProfileSummary> {
        Ok(
            sqlx::query_as("SELECT username,full_name,avatar_url FROM profiles WHERE id=?")
                .bind(profile_id)
                .fetch_one(&self.db_pool)
                .await?
        )
    }

    async fn approved_startups(&self) -> StoreResult<Vec<Startup>> {
        Ok(
            sqlx::query_as(&format!("SELECT {STARTUP_COLUMNS} FROM startups WHERE status=?"))
                .bind(StartupStatus::Approved)
                .fetch_all(&self.db_pool)
                .await?
        )
    }

    async fn approved_startups_by_owner(&self, user_id: &str) -> StoreResult<Vec<Startup>> {
        Ok(
            sqlx::query_as(
                r#"
                SELECT s.id,s.user_id,s.name,s.description,s.website_url,s.status,s.created_at,
                       s.views_count,s.likes_count,COUNT(l.startup_id) AS startup_likes
                FROM startups s
                LEFT JOIN startup_likes l ON l.startup_id = s.id
                WHERE s.user_id=? AND s.status=?
                GROUP BY s.id
                ORDER BY julianday(s.created_at) DESC
                "#
            )
                .bind(user_id)
                .bind(StartupStatus::Approved)
                .fetch_all(&self.db_pool)
                .await?
        )
    }

    async fn insert_startup_view(&self, view: &StartupView) -> StoreResult<()> {
        sqlx::query("INSERT INTO startup_views (startup_id,created_at) VALUES (?,?)")
            .bind(&view.startup_id)
            .bind(view.created_at)
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }

    async fn set_startup_views(&self, startup_id: &str, views_count: i64) -> StoreResult<()> {
        sqlx::query("UPDATE startups SET views_count=? WHERE id=?")
            .bind(views_count)
            .bind(startup_id)
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }

    async fn published_post_by_slug(&self, slug: &str) -> StoreResult<Post> {
        Ok(
            sqlx::query_as(&format!("SELECT {POST_COLUMNS} FROM posts WHERE slug=? AND status=?"))
                .bind(slug)
                .bind(PostStatus::Published)
                .fetch_one(&self.db_pool)
                .await?
        )
    }

    async fn published_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(
            sqlx::query_as(&format!("SELECT {POST_COLUMNS} FROM posts WHERE status=?"))
                .bind(PostStatus::Published)
                .fetch_all(&self.db_pool)
                .await?
        )
    }

    async fn set_post_slug(&self, post_id: &str, slug: &str) -> StoreResult<()> {
        sqlx::query("UPDATE posts SET slug=? WHERE id=?")
            .bind(slug)
            .bind(post_id)
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }
}
