use crate::config::MonitorConfig;
use crate::db::{init_db, Database, HistoryStore, SqliteHistory, SqliteReportSheet};
use crate::errors::MonitorResult;
use crate::graph::GraphClient;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod domain;
mod errors;
mod graph;
mod monitor;
mod spreadsheets;

#[cfg(test)]
mod tests;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waba_monitor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "❌ monitoring run failed");
        std::process::exit(1);
    }
}

fn run() -> MonitorResult<()> {
    let config_path =
        std::env::var("MONITOR_CONFIG").unwrap_or_else(|_| "monitor.json".to_string());
    let config = MonitorConfig::from_file(&config_path)?;
    config.validate()?;
    tracing::info!(path = %config_path, accounts = config.accounts.len(), "config loaded");

    // 1️⃣ Open the database holding the report grid and the history log
    let db = Database::open(&config.db_path)?;
    init_db(&db)?;
    let history = SqliteHistory::new(&db);
    let sheet = SqliteReportSheet::new(&db);

    // 2️⃣ Poll the Graph API and rebuild the report
    let client = GraphClient::new(config.request_timeout())?;
    let report = monitor::run_report(&config, &client, &history, &sheet, Utc::now())?;

    for failure in &report.failures {
        tracing::warn!(account = %failure.account_id, error = %failure.error, "account left empty");
    }

    // 3️⃣ Export the workbook
    spreadsheets::export_report_xlsx(&sheet.cells()?, &history.entries()?, &config.report_path)?;
    tracing::info!(path = %config.report_path.display(), "workbook written");

    Ok(())
}
