//! Recording of degraded paths.
//!
//! Loaders never log failures they swallow directly; they hand them to an
//! [`EventLog`] so tests can see exactly which fallbacks were taken.

use std::{fmt::Display, future::Future};

pub trait EventLog: Send + Sync {
    fn record(&self, event: &str, detail: &str);
}

/// Forwards events to `tracing` at WARN.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl EventLog for TracingLog {
    fn record(&self, event: &str, detail: &str) {
        tracing::warn!(event, "{detail}");
    }
}

/// Keeps every event in memory.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct RecordingLog {
    events: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(any(test, feature = "test-util"))]
impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, String)> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    pub fn has(&self, event: &str) -> bool {
        self.events().iter().any(|(name, _)| name == event)
    }
}

#[cfg(any(test, feature = "test-util"))]
impl EventLog for RecordingLog {
    fn record(&self, event: &str, detail: &str) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((event.to_owned(), detail.to_owned()));
    }
}

/// Runs `op`; on failure records `event` with the error and yields `None`.
pub async fn best_effort<T, E, F>(events: &dyn EventLog, event: &str, op: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match op.await {
        Ok(value) => Some(value),
        Err(err) => {
            events.record(event, &err.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn best_effort_passes_success_through() {
        let log = RecordingLog::new();
        let value = best_effort(&log, "noop", async { Ok::<_, String>(7) }).await;
        assert_eq!(value, Some(7));
        assert!(log.events().is_empty());
    }

    #[tokio::test]
    async fn best_effort_records_failure() {
        let log = RecordingLog::new();
        let value: Option<()> = best_effort(&log, "view_insert_failed", async { Err("disk on fire") }).await;
        assert_eq!(value, None);
        assert_eq!(
            log.events(),
            vec![("view_insert_failed".to_owned(), "disk on fire".to_owned())]
        );
    }
}
