use axum::{debug_handler, extract::{Path, State}, Json};
use serde::Serialize;

use crate::{
    db::Store,
    events::{best_effort, EventLog},
    models::{Profile, ProfileSummary, Startup},
    AppError, AppResult, AppState, Db, Events,
};

#[derive(Debug, Clone, Serialize)]
pub struct ProfilePage {
    pub profile: Profile,
    pub startups: Vec<Startup>,
    pub stats: ProfileStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_startups: usize,
    pub total_likes: i64,
}

impl ProfileStats {
    fn tally(startups: &[Startup]) -> Self {
        Self {
            total_startups: startups.len(),
            total_likes: startups.iter().map(|s| s.likes_count.unwrap_or(0)).sum(),
        }
    }
}

fn valid_username(username: &str) -> bool {
    username.len() >= 2
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A profile with its approved startups, newest first.
///
/// Failing to list startups still renders the profile, just without them.
pub async fn load_profile(
    store: &dyn Store,
    events: &dyn EventLog,
    username: &str,
) -> AppResult<ProfilePage> {
    if !valid_username(username) {
        return Err(AppError::not_found("Invalid username format"));
    }

    let profile = match store.profile_by_username(username).await {
        Ok(profile) => profile,
        Err(err) if err.is_no_rows() => {
            return Err(AppError::not_found(format!("Profile @{username} not found")));
        }
        Err(err) => return Err(AppError::Internal(anyhow::Error::new(err).context("Failed to load profile"))),
    };

    let startups = best_effort(
        events,
        "profile_startups_failed",
        store.approved_startups_by_owner(&profile.id),
    )
    .await
    .unwrap_or_default();

    let stats = ProfileStats::tally(&startups);
    tracing::debug!(username, total_startups = stats.total_startups, "loaded profile");

    Ok(ProfilePage { profile, startups, stats })
}

/// The embeddable summary of `user_id`'s profile, or `None` when it is
/// missing or the lookup fails. Only failures are recorded under `event`.
pub(crate) async fn embedded_summary(
    store: &dyn Store,
    events: &dyn EventLog,
    event: &str,
    user_id: &str,
) -> Option<ProfileSummary> {
    match store.profile_summary(user_id).await {
        Ok(summary) => Some(summary),
        Err(err) if err.is_no_rows() => None,
        Err(err) => {
            events.record(event, &err.to_string());
            None
        }
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn profile(
    Path(username): Path<String>,
    State(store): State<Db>,
    State(events): State<Events>,
) -> AppResult<Json<ProfilePage>> {
    load_profile(store.as_ref(), events.as_ref(), &username)
        .await
        .map(Json)
}
