// src/monitor/run.rs

use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashMap;

use crate::config::{BusinessAccountConfig, MonitorConfig, SUMMARY_CLEAR_ROWS};
use crate::db::{HistoryStore, ReportSink};
use crate::domain::asset::lookup_key;
use crate::domain::summary::AccountSummary;
use crate::errors::{MonitorError, MonitorResult};
use crate::graph::GraphFetch;
use crate::monitor::processor::AccountProcessor;

/// Statuses shown by the previous run, keyed by number.
#[derive(Debug, Default, Clone)]
pub struct PriorStatuses {
    by_key: HashMap<String, String>,
}

impl PriorStatuses {
    pub fn insert(&mut self, asset_id: &str, status: &str) {
        self.by_key.insert(lookup_key(asset_id), status.to_string());
    }

    pub fn get(&self, asset_id: &str) -> Option<&str> {
        self.by_key.get(&lookup_key(asset_id)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFailure {
    pub account_id: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub summaries: Vec<AccountSummary>,
    pub failures: Vec<AccountFailure>,
}

/// Reads every account's number/status pairs. Must run before the sheet is cleared.
pub fn read_prior_statuses(
    sheet: &dyn ReportSink,
    accounts: &[BusinessAccountConfig],
) -> MonitorResult<PriorStatuses> {
    let mut prior = PriorStatuses::default();

    for account in accounts {
        let numbers = sheet.read_range(account.first_row, account.number_col, account.data_rows, 1)?;
        let statuses = sheet.read_range(account.first_row, account.status_col, account.data_rows, 1)?;

        for (number, status) in numbers.iter().zip(&statuses) {
            if let (Some(number), Some(status)) = (&number[0], &status[0]) {
                prior.insert(number, status);
            }
        }
    }

    Ok(prior)
}

fn clear_account_area(sheet: &dyn ReportSink, account: &BusinessAccountConfig) -> MonitorResult<()> {
    for col in [account.number_col, account.status_col, account.limit_col] {
        sheet.clear_range(account.first_row, col, account.data_rows, 1)?;
    }
    sheet.clear_range(account.summary_row, account.number_col, SUMMARY_CLEAR_ROWS, 2)
}

/// One full monitoring pass over every configured business account.
///
/// Accounts run in config order, one after the other, so history rows keep a
/// stable order. A failing account is logged and skipped.
pub fn run_report(
    config: &MonitorConfig,
    api: &dyn GraphFetch,
    history: &dyn HistoryStore,
    sheet: &dyn ReportSink,
    now: DateTime<Utc>,
) -> MonitorResult<RunReport> {
    let offset = FixedOffset::east_opt(config.utc_offset_hours * 3600).ok_or_else(|| {
        MonitorError::Config(format!("invalid utc offset {}", config.utc_offset_hours))
    })?;

    let prior = read_prior_statuses(sheet, &config.accounts)?;
    if prior.is_empty() {
        tracing::info!("no previous statuses, numbers without history will be registered");
    } else {
        tracing::info!(remembered = prior.len(), "loaded previous statuses");
    }

    for account in &config.accounts {
        clear_account_area(sheet, account)?;
    }

    let processor = AccountProcessor::new(
        api,
        history,
        sheet,
        &config.graph_base_url,
        &config.graph_version,
    );

    let mut report = RunReport::default();
    for account in &config.accounts {
        match processor.process(account, &prior, now) {
            Ok(summary) => {
                tracing::info!(
                    account = %account.id,
                    good = summary.good,
                    medium = summary.medium,
                    low = summary.low,
                    health = summary.health_percent(),
                    "account processed"
                );
                report.summaries.push(summary);
            }
            Err(e) => {
                tracing::error!(account = %account.id, error = %e, "account processing failed");
                report.failures.push(AccountFailure {
                    account_id: account.id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    let footer = format!(
        "🕒 Last update: {}",
        now.with_timezone(&offset).format("%H:%M")
    );
    sheet.write_cell(config.footer_cell.row, config.footer_cell.col, &footer)?;

    tracing::info!(
        accounts = report.summaries.len(),
        failed = report.failures.len(),
        "✅ report updated, check Business Manager for any ACCOUNT RESTRICTED status"
    );

    Ok(report)
}
