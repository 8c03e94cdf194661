//! QR Codes

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a stored status name does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status \"{0}\"")]
pub struct UnknownStatusError(pub String);

/// Lifecycle status of a campaign QR code.
///
/// Transitions only ever leave [`QrStatus::Active`]; both other variants are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrStatus {
    /// Accepting scans.
    Active,

    /// Switched off, either manually or because the scan limit was reached.
    Inactive,

    /// Past its expiry timestamp.
    Expired,
}

impl QrStatus {
    /// Stored name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            QrStatus::Active => "active",
            QrStatus::Inactive => "inactive",
            QrStatus::Expired => "expired",
        }
    }

    /// Whether no further redemptions can ever be issued in this status.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, QrStatus::Active)
    }
}

impl Display for QrStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrStatus {
    type Err = UnknownStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(QrStatus::Active),
            "inactive" => Ok(QrStatus::Inactive),
            "expired" => Ok(QrStatus::Expired),
            other => Err(UnknownStatusError(other.to_string())),
        }
    }
}

/// The parts of a QR code that decide whether it can still be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrState {
    /// Current persisted status.
    pub status: QrStatus,

    /// Optional expiry; the code is expired at and after this instant.
    pub expires_at: Option<Timestamp>,

    /// Optional cap on cumulative scans.
    pub max_scans: Option<u64>,

    /// Cumulative successful scans so far.
    pub scans_count: u64,
}

impl QrState {
    /// A fresh active code with no limits and no scans.
    pub const fn active() -> Self {
        Self {
            status: QrStatus::Active,
            expires_at: None,
            max_scans: None,
            scans_count: 0,
        }
    }

    /// Whether the expiry timestamp has been reached at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    /// Whether the scan limit has been used up.
    pub fn is_exhausted(&self) -> bool {
        self.max_scans
            .is_some_and(|max_scans| self.scans_count >= max_scans)
    }

    /// Status an active code should move to at `now`, if any.
    ///
    /// Idempotent: a code that is already terminal, or still eligible, settles to `None`.
    /// Expiry wins over exhaustion when both apply.
    pub fn settle(&self, now: Timestamp) -> Option<QrStatus> {
        if self.status.is_terminal() {
            return None;
        }

        if self.is_expired(now) {
            Some(QrStatus::Expired)
        } else if self.is_exhausted() {
            Some(QrStatus::Inactive)
        } else {
            None
        }
    }
}

impl Default for QrState {
    fn default() -> Self {
        Self::active()
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn status_names_round_trip_through_from_str() -> TestResult {
        for status in [QrStatus::Active, QrStatus::Inactive, QrStatus::Expired] {
            assert_eq!(status.as_str().parse::<QrStatus>()?, status);
        }

        Ok(())
    }

    #[test]
    fn unknown_status_name_is_rejected() {
        let result = "paused".parse::<QrStatus>();

        assert_eq!(result, Err(UnknownStatusError("paused".to_string())));
    }

    #[test]
    fn only_active_is_non_terminal() {
        assert!(!QrStatus::Active.is_terminal());
        assert!(QrStatus::Inactive.is_terminal());
        assert!(QrStatus::Expired.is_terminal());
    }

    #[test]
    fn settle_leaves_unlimited_active_code_alone() {
        assert_eq!(QrState::active().settle(Timestamp::now()), None);
    }

    #[test]
    fn settle_expires_code_at_its_expiry_instant() {
        let now = Timestamp::now();

        let state = QrState {
            expires_at: Some(now),
            ..QrState::active()
        };

        assert_eq!(state.settle(now), Some(QrStatus::Expired));
    }

    #[test]
    fn settle_keeps_code_with_future_expiry() -> TestResult {
        let now = Timestamp::now();

        let state = QrState {
            expires_at: Some(now.checked_add(SignedDuration::from_hours(1))?),
            ..QrState::active()
        };

        assert_eq!(state.settle(now), None);

        Ok(())
    }

    #[test]
    fn settle_deactivates_exhausted_code() {
        let state = QrState {
            max_scans: Some(3),
            scans_count: 3,
            ..QrState::active()
        };

        assert_eq!(state.settle(Timestamp::now()), Some(QrStatus::Inactive));
    }

    #[test]
    fn settle_prefers_expiry_over_exhaustion() {
        let now = Timestamp::now();

        let state = QrState {
            expires_at: Some(now),
            max_scans: Some(1),
            scans_count: 5,
            ..QrState::active()
        };

        assert_eq!(state.settle(now), Some(QrStatus::Expired));
    }

    #[test]
    fn settle_is_noop_for_terminal_codes() {
        let now = Timestamp::now();

        let state = QrState {
            status: QrStatus::Inactive,
            expires_at: Some(now),
            max_scans: Some(1),
            scans_count: 1,
        };

        assert_eq!(state.settle(now), None);
    }
}
