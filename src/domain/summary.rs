// src/domain/summary.rs

use crate::domain::status::Bucket;

/// Per business account tally of good / medium / low numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSummary {
    pub account_id: String,
    pub good: u32,
    pub medium: u32,
    pub low: u32,
}

impl AccountSummary {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Good => self.good += 1,
            Bucket::Medium => self.medium += 1,
            Bucket::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.good + self.medium + self.low
    }

    /// Share of good numbers as a whole percentage; 0 for an empty account.
    pub fn health_percent(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (f64::from(self.good) / f64::from(total) * 100.0).round() as u32
    }

    /// Rows of the summary block, label then value.
    pub fn block(&self) -> [[String; 2]; 4] {
        [
            ["GOOD NUMBERS".to_string(), self.good.to_string()],
            ["MEDIUM NUMBERS".to_string(), self.medium.to_string()],
            ["LOW NUMBERS".to_string(), self.low.to_string()],
            ["HEALTH:".to_string(), format!("{}%", self.health_percent())],
        ]
    }
}
