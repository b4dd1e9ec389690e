mod page;

use axum::{routing::get, Router};

use crate::AppState;

pub use page::{resolve_startup, StartupPage, StartupWithFounder};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{name}", get(page::startup))
}
