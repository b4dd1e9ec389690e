pub mod appresult;
pub mod config;
pub mod db;
pub mod events;
pub mod models;
pub mod posts;
pub mod profiles;
pub mod slug;
pub mod startups;

use std::{sync::Arc, time::Duration};

use axum::{extract::FromRef, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;

use db::Store;
use events::EventLog;

pub type Db = Arc<dyn Store>;
pub type Events = Arc<dyn EventLog>;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Db,
    pub events: Events,
}

impl AppState {
    pub fn new(store: impl Store + 'static, events: impl EventLog + 'static) -> Self {
        Self {
            store: Arc::new(store),
            events: Arc::new(events),
        }
    }
}

pub fn router(app_state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/posts", posts::router())
        .nest("/startup", startups::router())
        .merge(profiles::router())

        .with_state(app_state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
