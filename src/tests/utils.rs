use crate::config::MonitorConfig;
use crate::db::{init_db, Database, ReportSink};
use crate::graph::{GraphError, GraphFetch};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;

/// Fresh in-memory database with the production schema.
pub fn init_test_db() -> Database {
    let db = Database::in_memory().unwrap_or_else(|e| panic!("Database open failed: {e}"));
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 10, 15, 0, 0).unwrap()
}

/// Two accounts side by side: bm-1 in columns A-C, bm-2 in E-G.
pub fn two_account_config() -> MonitorConfig {
    MonitorConfig::from_json(
        r#"{
            "graph_base_url": "http://graph.test",
            "accounts": [
                { "id": "bm-1", "access_token": "tok-1", "number_col": 0, "status_col": 1,
                  "limit_col": 2, "data_rows": 5, "summary_row": 7 },
                { "id": "bm-2", "access_token": "tok-2", "number_col": 4, "status_col": 5,
                  "limit_col": 6, "data_rows": 5, "summary_row": 7 }
            ]
        }"#,
    )
    .expect("test config parses")
}

/// Scripted Graph API keyed by `{node}/{edge}`.
#[derive(Default)]
pub struct FakeGraph {
    responses: RefCell<HashMap<String, Result<String, String>>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeGraph {
    pub fn owned_accounts(&self, business_id: &str, accounts: &[(&str, &str)]) {
        let data: Vec<Value> = accounts
            .iter()
            .map(|(id, status)| json!({ "id": id, "status": status }))
            .collect();
        self.set(
            &format!("{business_id}/owned_whatsapp_business_accounts"),
            json!({ "data": data }).to_string(),
        );
    }

    pub fn phone_numbers(&self, waba_id: &str, numbers: Value) {
        self.set(&format!("{waba_id}/phone_numbers"), numbers.to_string());
    }

    pub fn set(&self, key: &str, body: String) {
        self.responses.borrow_mut().insert(key.to_string(), Ok(body));
    }

    pub fn fail(&self, key: &str, message: &str) {
        self.responses
            .borrow_mut()
            .insert(key.to_string(), Err(message.to_string()));
    }
}

impl GraphFetch for FakeGraph {
    fn fetch(&self, url: &str) -> Result<String, GraphError> {
        self.calls.borrow_mut().push(url.to_string());
        let responses = self.responses.borrow();
        let hit = responses
            .iter()
            .find(|(key, _)| url.contains(&format!("/{key}?")))
            .map(|(_, r)| r.clone());

        match hit {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(GraphError::Network(message)),
            None => Err(GraphError::Http {
                status: 404,
                body: format!("no scripted response for {url}"),
            }),
        }
    }
}

pub fn number(display: &str, quality: &str, status: &str, tier: Option<&str>) -> Value {
    json!({
        "display_phone_number": display,
        "quality_rating": quality,
        "status": status,
        "messaging_limit_tier": tier,
    })
}

pub fn cell(sheet: &dyn ReportSink, row: u32, col: u16) -> Option<String> {
    sheet
        .read_range(row, col, 1, 1)
        .expect("read cell")
        .remove(0)
        .remove(0)
}
