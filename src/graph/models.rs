use serde::Deserialize;

use crate::graph::GraphError;

// owned_whatsapp_business_accounts
//  └── data[]
//       ├── id
//       └── status        (ACTIVE | DISABLED | RESTRICTED | ...)
//
// phone_numbers
//  └── data[]             (may be absent)
//       ├── display_phone_number
//       ├── quality_rating
//       ├── status
//       └── messaging_limit_tier

#[derive(Debug, Deserialize)]
pub struct OwnedAccountsResponse {
    pub data: Vec<OwnedAccount>,
}

#[derive(Debug, Deserialize)]
pub struct OwnedAccount {
    pub id: String,
    pub status: Option<String>,
}

impl OwnedAccount {
    /// A disabled or restricted account takes all of its numbers down with it.
    pub fn is_blocked(&self) -> bool {
        matches!(
            self.status.as_deref(),
            Some("DISABLED") | Some("RESTRICTED")
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct PhoneNumbersResponse {
    pub data: Option<Vec<PhoneNumberRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct PhoneNumberRecord {
    pub display_phone_number: Option<String>,
    pub quality_rating: Option<String>,
    pub status: Option<String>,
    pub messaging_limit_tier: Option<String>,
}

/// Body shape the Graph API uses for errors, even on some 200 responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<i64>,
}

pub fn parse_owned_accounts(body: &str) -> Result<OwnedAccountsResponse, GraphError> {
    check_error_envelope(body)?;
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| GraphError::JsonParse(e.to_string()))?;
    if value.get("data").map_or(true, |d| !d.is_array()) {
        return Err(GraphError::UnexpectedShape(
            "owned accounts response has no data array".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| GraphError::JsonParse(e.to_string()))
}

pub fn parse_phone_numbers(body: &str) -> Result<PhoneNumbersResponse, GraphError> {
    check_error_envelope(body)?;
    serde_json::from_str(body).map_err(|e| GraphError::JsonParse(e.to_string()))
}

fn check_error_envelope(body: &str) -> Result<(), GraphError> {
    if !body.trim_start().starts_with('{') {
        return Ok(());
    }
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return Err(GraphError::Api {
            code: envelope.error.code.unwrap_or_default(),
            message: envelope
                .error
                .message
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    Ok(())
}
