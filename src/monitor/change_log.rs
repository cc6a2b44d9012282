// src/monitor/change_log.rs

use chrono::{DateTime, Utc};

use crate::db::{HistoryEntry, HistoryStore};
use crate::domain::status::DisplayStatus;
use crate::errors::MonitorResult;

/// Previous-status column of a registration event.
pub const NEW_NUMBER_STATUS: &str = "🆕 NEW NUMBER";
/// New-status column of a registration event; also the maturation anchor.
pub const REGISTERED_STATUS: &str = "✅ REGISTERED (START 24H)";

/// What the logger decided for one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDecision {
    Registration,
    Transition,
    Skip,
}

/// Decides which status changes make it into the audit log.
pub struct ChangeLogger<'a> {
    history: &'a dyn HistoryStore,
}

impl<'a> ChangeLogger<'a> {
    pub fn new(history: &'a dyn HistoryStore) -> Self {
        Self { history }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn maybe_log(
        &self,
        asset_id: &str,
        prior_status: Option<&str>,
        new_status: DisplayStatus,
        owner_id: &str,
        is_maturing: bool,
        is_brand_new: bool,
        now: DateTime<Utc>,
    ) -> MonitorResult<LogDecision> {
        let decision = decide(prior_status, new_status, is_maturing, is_brand_new);

        let (previous, new) = match decision {
            LogDecision::Registration => (NEW_NUMBER_STATUS, REGISTERED_STATUS),
            // decide() only returns Transition with a prior status.
            LogDecision::Transition => (prior_status.unwrap_or_default(), new_status.label()),
            LogDecision::Skip => return Ok(LogDecision::Skip),
        };

        self.history.append(&HistoryEntry {
            logged_at: now,
            asset_id: asset_id.to_string(),
            previous_status: previous.to_string(),
            new_status: new.to_string(),
            owner_id: owner_id.to_string(),
        })?;

        tracing::info!(asset = asset_id, from = previous, to = new, "status change logged");
        Ok(decision)
    }
}

/// Registration always logs. Otherwise only a change between two settled,
/// previously known statuses does.
pub fn decide(
    prior_status: Option<&str>,
    new_status: DisplayStatus,
    is_maturing: bool,
    is_brand_new: bool,
) -> LogDecision {
    if is_brand_new {
        return LogDecision::Registration;
    }
    let Some(prior) = prior_status else {
        return LogDecision::Skip;
    };
    if is_maturing || new_status.is_maturation() {
        return LogDecision::Skip;
    }
    if DisplayStatus::from_label(prior).is_some_and(DisplayStatus::is_maturation) {
        return LogDecision::Skip;
    }
    if prior.trim() == new_status.label() {
        return LogDecision::Skip;
    }
    LogDecision::Transition
}
