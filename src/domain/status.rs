// src/domain/status.rs

/// Status shown in the report's status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    BannedAccount,
    BlockedFlagged,
    NewAwait24h,
    Maturing24h,
    HighSafe,
    MediumCaution,
    LowDanger,
}

impl DisplayStatus {
    pub const ALL: [DisplayStatus; 7] = [
        DisplayStatus::BannedAccount,
        DisplayStatus::BlockedFlagged,
        DisplayStatus::NewAwait24h,
        DisplayStatus::Maturing24h,
        DisplayStatus::HighSafe,
        DisplayStatus::MediumCaution,
        DisplayStatus::LowDanger,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayStatus::BannedAccount => "🚫 ACCOUNT RESTRICTED (BAN)",
            DisplayStatus::BlockedFlagged => "🚫 BLOCKED / FLAG",
            DisplayStatus::NewAwait24h => "🆕 NEW (AWAIT 24H)",
            DisplayStatus::Maturing24h => "⏳ MATURING (24H)",
            DisplayStatus::HighSafe => "🟢 HIGH (SAFE)",
            DisplayStatus::MediumCaution => "🟡 MEDIUM (CAUTION)",
            DisplayStatus::LowDanger => "🔴 LOW (DANGER)",
        }
    }

    /// Reverse of `label`, for statuses read back from the report.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    /// New and maturing numbers are inside the 24h grace window.
    pub fn is_maturation(self) -> bool {
        matches!(self, DisplayStatus::NewAwait24h | DisplayStatus::Maturing24h)
    }
}

/// Messaging-limit column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitTier {
    Tier1k,
    Tier10k,
    Tier100k,
    Unlimited,
    TotalRisk,
    Maturating,
    Await,
}

impl LimitTier {
    pub fn label(self) -> &'static str {
        match self {
            LimitTier::Tier1k => "✅ RELEASED (1K)",
            LimitTier::Tier10k => "🔥 RELEASED (10K)",
            LimitTier::Tier100k => "🚀 RELEASED (100K)",
            LimitTier::Unlimited => "👑 UNLIMITED",
            LimitTier::TotalRisk => "⚠️ TOTAL RISK",
            LimitTier::Maturating => "⏳ MATURATING",
            LimitTier::Await => "⏳ AWAIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Good,
    Medium,
    Low,
}

/// Connection status as reported by the API, reduced to what the rules care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Connected,
    /// FLAGGED, BANNED, RESTRICTED or BLOCKED.
    Blocked,
    Other,
}

impl Connection {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CONNECTED" => Connection::Connected,
            "FLAGGED" | "BANNED" | "RESTRICTED" | "BLOCKED" => Connection::Blocked,
            _ => Connection::Other,
        }
    }
}

/// Quality rating family. The API sends free-form strings (HIGH, GREEN, ...),
/// so matching is by substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    High,
    Medium,
    Other,
}

impl Quality {
    pub fn parse(raw: &str) -> Self {
        let q = raw.to_uppercase();
        if q.contains("HIGH") || q.contains("GREEN") {
            Quality::High
        } else if q.contains("MEDIUM") || q.contains("YELLOW") {
            Quality::Medium
        } else {
            Quality::Other
        }
    }
}

/// Maps the raw `messaging_limit_tier` token to a limit. Absent or unknown
/// tokens fall back to the 1K tier.
pub fn tier_lookup(tier: Option<&str>) -> LimitTier {
    let Some(tier) = tier else {
        return LimitTier::Tier1k;
    };
    let tier = tier.trim().to_ascii_uppercase();
    // TIER_100K contains TIER_10K, so the longer token goes first.
    if tier.contains("TIER_100K") {
        LimitTier::Tier100k
    } else if tier.contains("TIER_10K") {
        LimitTier::Tier10k
    } else if tier.contains("UNLIMITED") {
        LimitTier::Unlimited
    } else {
        LimitTier::Tier1k
    }
}

/// Inputs to `classify`, already normalised at the API boundary.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput<'a> {
    pub owner_blocked: bool,
    pub quality: Quality,
    pub connection: Connection,
    pub tier: Option<&'a str>,
    pub is_maturing: bool,
    pub is_brand_new: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: DisplayStatus,
    pub limit: LimitTier,
    pub bucket: Bucket,
    pub highlight: bool,
}

/// Turns one number's signals into what the report shows.
///
/// The order of checks is the business rule: account bans and explicit flags
/// beat the grace window, and the grace window beats quality.
pub fn classify(input: &ClassifyInput<'_>) -> Classification {
    let plain = |status, limit, bucket| Classification {
        status,
        limit,
        bucket,
        highlight: false,
    };

    if input.owner_blocked {
        return plain(DisplayStatus::BannedAccount, LimitTier::TotalRisk, Bucket::Low);
    }
    if input.connection == Connection::Blocked {
        return plain(DisplayStatus::BlockedFlagged, LimitTier::TotalRisk, Bucket::Low);
    }
    if input.is_brand_new {
        return Classification {
            status: DisplayStatus::NewAwait24h,
            limit: LimitTier::Maturating,
            bucket: Bucket::Good,
            highlight: true,
        };
    }
    if input.is_maturing {
        return Classification {
            status: DisplayStatus::Maturing24h,
            limit: LimitTier::Await,
            bucket: Bucket::Good,
            highlight: true,
        };
    }

    let limit = tier_lookup(input.tier);
    if input.quality == Quality::High || input.connection == Connection::Connected {
        plain(DisplayStatus::HighSafe, limit, Bucket::Good)
    } else if input.quality == Quality::Medium {
        plain(DisplayStatus::MediumCaution, limit, Bucket::Medium)
    } else {
        plain(DisplayStatus::LowDanger, limit, Bucket::Low)
    }
}
