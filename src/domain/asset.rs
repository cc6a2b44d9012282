// src/domain/asset.rs

use crate::domain::status::{Connection, Quality};
use crate::graph::models::PhoneNumberRecord;

/// Placeholder for numbers the API returns without a display number.
pub const UNNAMED_NUMBER: &str = "N/A";

/// A phone number as returned by the API, normalised and ready to classify.
/// This keeps the free-form API strings out of the status rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// Display phone number, exactly as the API formats it.
    pub id: String,
    /// `lookup_key` of `id`, used for every lookup.
    pub key: String,
    pub quality: Quality,
    pub connection: Connection,
    pub raw_quality: String,
    pub raw_status: String,
    pub limit_tier: Option<String>,
    pub owner_blocked: bool,
}

impl Asset {
    pub fn from_record(record: &PhoneNumberRecord, owner_blocked: bool) -> Self {
        let id = record
            .display_phone_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNNAMED_NUMBER)
            .to_string();

        let raw_quality = record
            .quality_rating
            .as_deref()
            .unwrap_or("")
            .to_uppercase();
        let raw_status = record
            .status
            .as_deref()
            .unwrap_or("UNKNOWN")
            .to_uppercase();

        Asset {
            key: lookup_key(&id),
            quality: Quality::parse(&raw_quality),
            connection: Connection::parse(&raw_status),
            raw_quality,
            raw_status,
            limit_tier: record.messaging_limit_tier.clone(),
            owner_blocked,
            id,
        }
    }
}

/// Strips everything but ASCII digits so `'+1 (555) 123-4567` and
/// `15551234567` refer to the same number.
pub fn normalize_asset_id(id: &str) -> String {
    id.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Key used to match a number across the report and the history log.
/// Numbers without digits (the `N/A` placeholder) fall back to their text.
pub fn lookup_key(id: &str) -> String {
    let digits = normalize_asset_id(id);
    if digits.is_empty() {
        id.trim().trim_start_matches('\'').trim().to_string()
    } else {
        digits
    }
}
