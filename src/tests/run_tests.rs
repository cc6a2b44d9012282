// src/tests/run_tests.rs
use super::utils::{cell, init_test_db, number, t0, two_account_config, FakeGraph};
use crate::db::{HistoryStore, ReportSink, SqliteHistory, SqliteReportSheet};
use crate::domain::status::{DisplayStatus, LimitTier};
use crate::errors::MonitorResult;
use crate::monitor::change_log::{NEW_NUMBER_STATUS, REGISTERED_STATUS};
use crate::monitor::{read_prior_statuses, run_report};
use chrono::Duration;
use serde_json::json;

fn script_bm2_empty(api: &FakeGraph) {
    api.owned_accounts("bm-2", &[]);
}

#[test]
fn new_number_matures_then_settles() -> MonitorResult<()> {
    let db = init_test_db();
    let history = SqliteHistory::new(&db);
    let sheet = SqliteReportSheet::new(&db);
    let config = two_account_config();

    let api = FakeGraph::default();
    api.owned_accounts("bm-1", &[("waba-1", "ACTIVE")]);
    api.phone_numbers(
        "waba-1",
        json!({ "data": [number("+55 11 91234-5678", "GREEN", "CONNECTED", Some("TIER_10K"))] }),
    );
    script_bm2_empty(&api);

    // First sighting: registered and held back.
    run_report(&config, &api, &history, &sheet, t0())?;
    assert_eq!(cell(&sheet, 1, 0).as_deref(), Some("+55 11 91234-5678"));
    assert_eq!(cell(&sheet, 1, 1).as_deref(), Some(DisplayStatus::NewAwait24h.label()));
    assert_eq!(cell(&sheet, 1, 2).as_deref(), Some(LimitTier::Maturating.label()));
    let entries = history.entries()?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].previous_status, NEW_NUMBER_STATUS);
    assert_eq!(entries[0].new_status, REGISTERED_STATUS);
    assert_eq!(entries[0].owner_id, "bm-1");

    let highlighted: Vec<_> = sheet.cells()?.into_iter().filter(|c| c.highlight).collect();
    assert_eq!(highlighted.len(), 2);

    // An hour later: maturing, nothing new in the log.
    run_report(&config, &api, &history, &sheet, t0() + Duration::hours(1))?;
    assert_eq!(cell(&sheet, 1, 1).as_deref(), Some(DisplayStatus::Maturing24h.label()));
    assert_eq!(cell(&sheet, 1, 2).as_deref(), Some(LimitTier::Await.label()));
    assert_eq!(history.entries()?.len(), 1);

    // Past the window: real status shows, leaving maturation is not logged.
    run_report(&config, &api, &history, &sheet, t0() + Duration::hours(25))?;
    assert_eq!(cell(&sheet, 1, 1).as_deref(), Some(DisplayStatus::HighSafe.label()));
    assert_eq!(cell(&sheet, 1, 2).as_deref(), Some(LimitTier::Tier10k.label()));
    assert_eq!(history.entries()?.len(), 1);
    assert!(sheet.cells()?.iter().all(|c| !c.highlight));

    // A real quality drop is logged, newest first.
    api.phone_numbers(
        "waba-1",
        json!({ "data": [number("+55 11 91234-5678", "YELLOW", "PENDING", Some("TIER_10K"))] }),
    );
    run_report(&config, &api, &history, &sheet, t0() + Duration::hours(26))?;
    let entries = history.entries()?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].previous_status, DisplayStatus::HighSafe.label());
    assert_eq!(entries[0].new_status, DisplayStatus::MediumCaution.label());
    assert_eq!(entries[1].new_status, REGISTERED_STATUS);
    Ok(())
}

#[test]
fn failing_account_does_not_block_others() -> MonitorResult<()> {
    let db = init_test_db();
    let history = SqliteHistory::new(&db);
    let sheet = SqliteReportSheet::new(&db);
    let config = two_account_config();

    // Stale content from an earlier run must be cleared for the failed account.
    sheet.write_cell(1, 0, "5511000000000")?;
    sheet.write_cell(7, 0, "GOOD NUMBERS")?;

    let api = FakeGraph::default();
    api.fail("bm-1/owned_whatsapp_business_accounts", "connection reset");
    api.owned_accounts("bm-2", &[("waba-2", "ACTIVE")]);
    api.phone_numbers(
        "waba-2",
        json!({ "data": [
            number("5521900000001", "HIGH", "CONNECTED", None),
            number("5521900000002", "LOW", "FLAGGED", Some("UNLIMITED")),
        ] }),
    );

    let report = run_report(&config, &api, &history, &sheet, t0())?;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].account_id, "bm-1");
    assert!(report.failures[0].error.contains("connection reset"));
    assert_eq!(report.summaries.len(), 1);

    assert_eq!(cell(&sheet, 1, 0), None);
    assert_eq!(cell(&sheet, 7, 0), None);

    assert_eq!(cell(&sheet, 7, 4).as_deref(), Some("GOOD NUMBERS"));
    assert_eq!(cell(&sheet, 7, 5).as_deref(), Some("1"));
    assert_eq!(cell(&sheet, 9, 5).as_deref(), Some("1"));
    assert_eq!(cell(&sheet, 10, 4).as_deref(), Some("HEALTH:"));
    assert_eq!(cell(&sheet, 10, 5).as_deref(), Some("50%"));
    assert_eq!(cell(&sheet, 2, 6).as_deref(), Some(LimitTier::TotalRisk.label()));
    Ok(())
}

#[test]
fn footer_uses_configured_offset() -> MonitorResult<()> {
    let db = init_test_db();
    let history = SqliteHistory::new(&db);
    let sheet = SqliteReportSheet::new(&db);
    let config = two_account_config();

    let api = FakeGraph::default();
    api.owned_accounts("bm-1", &[]);
    script_bm2_empty(&api);

    let report = run_report(&config, &api, &history, &sheet, t0())?;
    assert!(report.failures.is_empty());
    // 15:00 UTC at GMT-3.
    assert_eq!(cell(&sheet, 22, 5).as_deref(), Some("🕒 Last update: 12:00"));
    assert_eq!(cell(&sheet, 10, 1).as_deref(), Some("0%"));
    Ok(())
}

#[test]
fn prior_statuses_match_across_number_formats() -> MonitorResult<()> {
    let db = init_test_db();
    let sheet = SqliteReportSheet::new(&db);
    let config = two_account_config();

    sheet.write_cell(1, 0, "'+1 (555) 123-4567")?;
    sheet.write_cell(1, 1, DisplayStatus::LowDanger.label())?;
    sheet.write_cell(2, 4, "N/A")?;
    sheet.write_cell(2, 5, DisplayStatus::HighSafe.label())?;
    // Number without a status is not remembered.
    sheet.write_cell(3, 0, "15550000000")?;

    let prior = read_prior_statuses(&sheet, &config.accounts)?;
    assert_eq!(prior.len(), 2);
    assert_eq!(prior.get("15551234567"), Some(DisplayStatus::LowDanger.label()));
    assert_eq!(prior.get("N/A"), Some(DisplayStatus::HighSafe.label()));
    assert_eq!(prior.get("15550000000"), None);
    Ok(())
}

#[test]
fn cleared_sheet_with_old_registration_is_not_new_again() -> MonitorResult<()> {
    let db = init_test_db();
    let history = SqliteHistory::new(&db);
    let sheet = SqliteReportSheet::new(&db);
    let config = two_account_config();

    let api = FakeGraph::default();
    api.owned_accounts("bm-1", &[("waba-1", "ACTIVE")]);
    api.phone_numbers(
        "waba-1",
        json!({ "data": [number("5511955554444", "MEDIUM", "PENDING", None)] }),
    );
    script_bm2_empty(&api);

    run_report(&config, &api, &history, &sheet, t0())?;
    assert_eq!(history.entries()?.len(), 1);

    // Someone wiped the report; the registration row is still there.
    sheet.clear_range(0, 0, 30, 12)?;
    run_report(&config, &api, &history, &sheet, t0() + Duration::days(3))?;

    assert_eq!(cell(&sheet, 1, 1).as_deref(), Some(DisplayStatus::MediumCaution.label()));
    assert_eq!(cell(&sheet, 1, 2).as_deref(), Some(LimitTier::Tier1k.label()));
    assert_eq!(history.entries()?.len(), 1);
    Ok(())
}

#[test]
fn numbers_without_display_number_register_once_and_mature() -> MonitorResult<()> {
    let db = init_test_db();
    let history = SqliteHistory::new(&db);
    let sheet = SqliteReportSheet::new(&db);
    let config = two_account_config();

    let api = FakeGraph::default();
    api.owned_accounts("bm-1", &[("waba-1", "ACTIVE")]);
    api.phone_numbers(
        "waba-1",
        json!({ "data": [
            { "quality_rating": "LOW", "status": "PENDING" },
            { "quality_rating": "LOW", "status": "PENDING" },
        ] }),
    );
    script_bm2_empty(&api);

    run_report(&config, &api, &history, &sheet, t0())?;
    let entries = history.entries()?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].asset_id, "N/A");
    assert_eq!(entries[0].new_status, REGISTERED_STATUS);

    run_report(&config, &api, &history, &sheet, t0() + Duration::hours(1))?;
    assert_eq!(cell(&sheet, 1, 0).as_deref(), Some("N/A"));
    assert_eq!(cell(&sheet, 1, 1).as_deref(), Some(DisplayStatus::Maturing24h.label()));
    assert_eq!(cell(&sheet, 2, 1).as_deref(), Some(DisplayStatus::Maturing24h.label()));
    assert_eq!(history.entries()?.len(), 1);
    Ok(())
}
