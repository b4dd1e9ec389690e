mod page;

use axum::{routing::get, Router};

use crate::AppState;

pub use page::{load_profile, ProfilePage, ProfileStats};
pub(crate) use page::embedded_summary;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{username}", get(page::profile))
}
