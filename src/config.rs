// config.rs
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{MonitorError, MonitorResult};

/// Height of the block cleared under each account's summary row.
pub const SUMMARY_CLEAR_ROWS: u32 = 6;

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,
    #[serde(default = "default_graph_version")]
    pub graph_version: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    /// Offset of the footer clock from UTC.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,
    #[serde(default = "default_footer_cell")]
    pub footer_cell: CellRef,
    pub accounts: Vec<BusinessAccountConfig>,
}

/// 0-based (row, col) address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusinessAccountConfig {
    pub id: String,
    #[serde(default)]
    pub access_token: Option<String>,
    /// Name of an env var holding the token, used when `access_token` is absent.
    #[serde(default)]
    pub access_token_env: Option<String>,
    pub number_col: u16,
    pub status_col: u16,
    pub limit_col: u16,
    #[serde(default = "default_first_row")]
    pub first_row: u32,
    pub data_rows: u32,
    pub summary_row: u32,
}

fn default_graph_base_url() -> String {
    "https://graph.facebook.com".to_string()
}
fn default_graph_version() -> String {
    "v22.0".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_db_path() -> PathBuf {
    PathBuf::from("monitor.sqlite3")
}
fn default_report_path() -> PathBuf {
    PathBuf::from("report.xlsx")
}
fn default_utc_offset() -> i32 {
    -3
}
fn default_footer_cell() -> CellRef {
    // F23
    CellRef { row: 22, col: 5 }
}
fn default_first_row() -> u32 {
    1
}

impl MonitorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> MonitorResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MonitorError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> MonitorResult<Self> {
        serde_json::from_str(text).map_err(|e| MonitorError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolves every account token up front so a bad config fails before any fetch.
    pub fn validate(&self) -> MonitorResult<()> {
        if self.accounts.is_empty() {
            return Err(MonitorError::Config("no accounts configured".to_string()));
        }
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(MonitorError::Config(format!(
                "utc_offset_hours out of range: {}",
                self.utc_offset_hours
            )));
        }

        let mut owners: HashMap<u16, &str> = HashMap::new();
        for account in &self.accounts {
            account.token()?;
            account.validate_layout()?;

            for col in account.columns() {
                if let Some(other) = owners.insert(col, account.id.as_str()) {
                    return Err(MonitorError::Config(format!(
                        "column {col} used by both {other} and {}",
                        account.id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl BusinessAccountConfig {
    pub fn token(&self) -> MonitorResult<String> {
        if let Some(token) = self.access_token.as_deref().filter(|t| !t.is_empty()) {
            return Ok(token.to_string());
        }
        let var = self.access_token_env.as_deref().ok_or_else(|| {
            MonitorError::Config(format!("account {} has no access token", self.id))
        })?;
        std::env::var(var).map_err(|_| {
            MonitorError::Config(format!("{var} environment variable not set (account {})", self.id))
        })
    }

    /// Distinct report columns owned by this account, summary block included.
    pub fn columns(&self) -> Vec<u16> {
        let mut cols = vec![
            self.number_col,
            self.status_col,
            self.limit_col,
            self.number_col + 1,
        ];
        cols.sort_unstable();
        cols.dedup();
        cols
    }

    fn validate_layout(&self) -> MonitorResult<()> {
        let cols = [self.number_col, self.status_col, self.limit_col];
        if cols[0] == cols[1] || cols[0] == cols[2] || cols[1] == cols[2] {
            return Err(MonitorError::Config(format!(
                "account {} reuses a column for number/status/limit",
                self.id
            )));
        }
        if self.data_rows == 0 {
            return Err(MonitorError::Config(format!(
                "account {} has no data rows",
                self.id
            )));
        }
        if self.last_data_row() >= self.summary_row {
            return Err(MonitorError::Config(format!(
                "account {} data rows run into its summary at row {}",
                self.id, self.summary_row
            )));
        }
        Ok(())
    }

    pub fn last_data_row(&self) -> u32 {
        self.first_row + self.data_rows - 1
    }
}
