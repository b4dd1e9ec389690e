mod page;

use axum::{routing::get, Router};

use crate::AppState;

pub use page::{resolve_post, PostPage, PostWithAuthor};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(page::post))
}
