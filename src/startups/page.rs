use axum::{debug_handler, extract::{Path, State}, Json};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    db::Store,
    events::{best_effort, EventLog},
    models::{ProfileSummary, Startup, StartupView},
    profiles::embedded_summary,
    slug::{derive_url_name, encode_segment},
    AppError, AppResult, AppState, Db, Events,
};

#[derive(Debug, Clone, Serialize)]
pub struct StartupPage {
    pub startup: StartupWithFounder,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartupWithFounder {
    #[serde(flatten)]
    pub startup: Startup,
    #[serde(rename = "profiles")]
    pub founder: Option<ProfileSummary>,
}

/// Finds the approved startup whose URL name is `url_name` and counts a view.
///
/// `url_name` is the percent-encoded path segment. The first startup
/// (in store order) whose derived URL name matches wins. The returned view
/// count already includes this view whether or not recording it worked.
pub async fn resolve_startup(
    store: &dyn Store,
    events: &dyn EventLog,
    url_name: &str,
) -> AppResult<StartupPage> {
    if url_name.is_empty() {
        return Err(AppError::not_found("Invalid startup name"));
    }

    tracing::debug!(url_name, "loading startup");

    let startups = store.approved_startups().await
        .map_err(|err| AppError::Internal(anyhow::Error::new(err).context("Failed to load startup")))?;
    if startups.is_empty() {
        return Err(AppError::not_found("No startups available"));
    }

    let Some(mut startup) = startups.iter().find(|s| derive_url_name(&s.name) == url_name).cloned() else {
        tracing::debug!(
            url_name,
            candidates = ?startups.iter().map(|s| derive_url_name(&s.name)).collect::<Vec<_>>(),
            "no startup matches url name"
        );
        return Err(AppError::not_found("Startup not found"));
    };

    let founder = embedded_summary(store, events, "startup_founder_failed", &startup.user_id).await;

    let views_count = startup.views_count.unwrap_or(0).saturating_add(1);
    record_view(store, events, &startup.id, views_count).await;
    startup.views_count = Some(views_count);

    Ok(StartupPage {
        startup: StartupWithFounder { startup, founder },
    })
}

async fn record_view(store: &dyn Store, events: &dyn EventLog, startup_id: &str, views_count: i64) {
    let view = StartupView {
        startup_id: startup_id.to_owned(),
        created_at: OffsetDateTime::now_utc(),
    };
    best_effort(events, "startup_view_insert_failed", store.insert_startup_view(&view)).await;
    best_effort(events, "startup_view_count_failed", store.set_startup_views(startup_id, views_count)).await;
}

#[debug_handler(state = AppState)]
pub(crate) async fn startup(
    Path(name): Path<String>,
    State(store): State<Db>,
    State(events): State<Events>,
) -> AppResult<Json<StartupPage>> {
    // axum decodes path params; match on the encoded form
    let url_name = encode_segment(&name);

    resolve_startup(store.as_ref(), events.as_ref(), &url_name)
        .await
        .map(Json)
}
