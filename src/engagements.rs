//! Engagements

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::qr_codes::UnknownStatusError;

/// Outcome recorded for a single scan attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementStatus {
    /// Scanned without a redemption being issued.
    Scanned,

    /// Repeat scan from a device that already claimed the offer.
    Duplicate,

    /// Scan that issued a redemption code.
    Redeemed,

    /// Scan against a code that was no longer active.
    Failed,
}

impl EngagementStatus {
    /// Every status, in reporting order.
    pub const ALL: [EngagementStatus; 4] = [
        EngagementStatus::Scanned,
        EngagementStatus::Duplicate,
        EngagementStatus::Redeemed,
        EngagementStatus::Failed,
    ];

    /// Stored name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            EngagementStatus::Scanned => "scanned",
            EngagementStatus::Duplicate => "duplicate",
            EngagementStatus::Redeemed => "redeemed",
            EngagementStatus::Failed => "failed",
        }
    }

    /// Whether this engagement counts as the device having claimed the offer.
    pub const fn is_claim(self) -> bool {
        matches!(self, EngagementStatus::Scanned | EngagementStatus::Redeemed)
    }
}

impl Display for EngagementStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngagementStatus {
    type Err = UnknownStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "scanned" => Ok(EngagementStatus::Scanned),
            "duplicate" => Ok(EngagementStatus::Duplicate),
            "redeemed" => Ok(EngagementStatus::Redeemed),
            "failed" => Ok(EngagementStatus::Failed),
            other => Err(UnknownStatusError(other.to_string())),
        }
    }
}

/// What the ledger already knows about one device against one QR code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceHistory {
    /// Engagements of any status.
    pub engagements: u64,

    /// Engagements that claimed the offer (`scanned` or `redeemed`).
    pub claims: u64,
}

impl DeviceHistory {
    /// Whether the device has never been seen for this code.
    pub const fn is_first_visit(&self) -> bool {
        self.engagements == 0
    }

    /// Whether the device already claimed the offer.
    pub const fn has_claimed(&self) -> bool {
        self.claims > 0
    }

    /// Fold one more engagement into the history.
    pub fn record(&mut self, status: EngagementStatus) {
        self.engagements += 1;

        if status.is_claim() {
            self.claims += 1;
        }
    }
}
