// src/monitor/processor.rs

use chrono::{DateTime, Utc};

use crate::config::BusinessAccountConfig;
use crate::db::{HistoryStore, ReportSink};
use crate::domain::asset::Asset;
use crate::domain::status::{classify, Classification, ClassifyInput};
use crate::domain::summary::AccountSummary;
use crate::errors::MonitorResult;
use crate::graph::models::{parse_owned_accounts, parse_phone_numbers};
use crate::graph::{owned_accounts_url, phone_numbers_url, GraphFetch};
use crate::monitor::change_log::{ChangeLogger, LogDecision};
use crate::monitor::maturation::MaturationTracker;
use crate::monitor::run::PriorStatuses;

/// Everything decided about one number during a run.
#[derive(Debug, Clone)]
pub struct AssetOutcome {
    pub asset: Asset,
    pub classification: Classification,
    pub is_brand_new: bool,
    pub is_maturing: bool,
    pub log: LogDecision,
}

/// Walks one business account: its WhatsApp accounts, then their numbers.
pub struct AccountProcessor<'a> {
    api: &'a dyn GraphFetch,
    history: &'a dyn HistoryStore,
    sheet: &'a dyn ReportSink,
    graph_base_url: &'a str,
    graph_version: &'a str,
}

impl<'a> AccountProcessor<'a> {
    pub fn new(
        api: &'a dyn GraphFetch,
        history: &'a dyn HistoryStore,
        sheet: &'a dyn ReportSink,
        graph_base_url: &'a str,
        graph_version: &'a str,
    ) -> Self {
        Self {
            api,
            history,
            sheet,
            graph_base_url,
            graph_version,
        }
    }

    /// Fetches, classifies and writes every number of `account`, then its summary block.
    ///
    /// Any fetch or parse error aborts this account only; rows already written stay.
    pub fn process(
        &self,
        account: &BusinessAccountConfig,
        prior: &PriorStatuses,
        now: DateTime<Utc>,
    ) -> MonitorResult<AccountSummary> {
        let token = account.token()?;
        let url = owned_accounts_url(self.graph_base_url, self.graph_version, &account.id, &token)?;
        let owned = parse_owned_accounts(&self.api.fetch(&url)?)?;

        tracing::info!(
            account = %account.id,
            owned_accounts = owned.data.len(),
            "processing business account"
        );

        let mut summary = AccountSummary::new(&account.id);
        let mut row = account.first_row;

        for waba in &owned.data {
            let owner_blocked = waba.is_blocked();
            if owner_blocked {
                tracing::warn!(account = %account.id, waba = %waba.id, "whatsapp account is restricted");
            }

            let url = phone_numbers_url(self.graph_base_url, self.graph_version, &waba.id, &token)?;
            let numbers = parse_phone_numbers(&self.api.fetch(&url)?)?;
            let records = numbers.data.unwrap_or_default();

            for record in &records {
                let asset = Asset::from_record(record, owner_blocked);
                tracing::debug!(
                    number = %asset.id,
                    quality = %asset.raw_quality,
                    status = %asset.raw_status,
                    tier = ?asset.limit_tier,
                    "number fetched"
                );
                let outcome = self.evaluate(asset, &account.id, prior, now)?;
                summary.record(outcome.classification.bucket);

                if row <= account.last_data_row() {
                    self.write_row(account, row, &outcome)?;
                } else {
                    tracing::warn!(
                        account = %account.id,
                        number = %outcome.asset.id,
                        "report area full, number counted but not written"
                    );
                }
                row += 1;
            }
        }

        let block: Vec<Vec<String>> = summary.block().into_iter().map(Vec::from).collect();
        self.sheet
            .write_range(account.summary_row, account.number_col, &block)?;

        Ok(summary)
    }

    /// Classifies one number and records its change-log entry, if any.
    pub fn evaluate(
        &self,
        asset: Asset,
        owner_id: &str,
        prior: &PriorStatuses,
        now: DateTime<Utc>,
    ) -> MonitorResult<AssetOutcome> {
        let tracker = MaturationTracker::new(self.history);
        let logger = ChangeLogger::new(self.history);

        let prior_status = prior.get(&asset.id);
        let window = tracker.window(&asset.id, now)?;
        let is_brand_new = prior_status.is_none() && window.registered_at.is_none();
        let is_maturing = window.is_maturing;

        let classification = classify(&ClassifyInput {
            owner_blocked: asset.owner_blocked,
            quality: asset.quality,
            connection: asset.connection,
            tier: asset.limit_tier.as_deref(),
            is_maturing,
            is_brand_new,
        });

        let log = logger.maybe_log(
            &asset.id,
            prior_status,
            classification.status,
            owner_id,
            is_maturing,
            is_brand_new,
            now,
        )?;

        Ok(AssetOutcome {
            asset,
            classification,
            is_brand_new,
            is_maturing,
            log,
        })
    }

    fn write_row(
        &self,
        account: &BusinessAccountConfig,
        row: u32,
        outcome: &AssetOutcome,
    ) -> MonitorResult<()> {
        let c = &outcome.classification;
        self.sheet.write_cell(row, account.number_col, &outcome.asset.id)?;
        self.sheet.write_cell(row, account.status_col, c.status.label())?;
        self.sheet.write_cell(row, account.limit_col, c.limit.label())?;
        if c.highlight {
            self.sheet.set_highlight(row, account.status_col, true)?;
            self.sheet.set_highlight(row, account.limit_col, true)?;
        }
        Ok(())
    }
}
