// src/monitor/maturation.rs

use chrono::{DateTime, Duration, Utc};

use crate::db::HistoryStore;
use crate::errors::MonitorResult;
use crate::monitor::change_log::REGISTERED_STATUS;

/// Grace period after registration during which a number's real status is held back.
pub const MATURATION_WINDOW_MS: i64 = 86_400_000;

/// Answers "is this number still inside its first 24 hours?" from the history log.
pub struct MaturationTracker<'a> {
    history: &'a dyn HistoryStore,
}

impl<'a> MaturationTracker<'a> {
    pub fn new(history: &'a dyn HistoryStore) -> Self {
        Self { history }
    }

    /// When the number was first logged as registered, if ever.
    pub fn registered_at(&self, asset_id: &str) -> MonitorResult<Option<DateTime<Utc>>> {
        self.history.first_with_status(asset_id, REGISTERED_STATUS)
    }

    pub fn is_maturing(&self, asset_id: &str, now: DateTime<Utc>) -> MonitorResult<bool> {
        Ok(self.window(asset_id, now)?.is_maturing)
    }

    /// Registration time and maturity from a single history lookup.
    pub fn window(&self, asset_id: &str, now: DateTime<Utc>) -> MonitorResult<Window> {
        let registered_at = self.registered_at(asset_id)?;
        Ok(Window {
            registered_at,
            is_maturing: registered_at.is_some_and(|at| within_window(at, now)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub registered_at: Option<DateTime<Utc>>,
    pub is_maturing: bool,
}

pub fn within_window(registered_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(registered_at) < Duration::milliseconds(MATURATION_WINDOW_MS)
}
