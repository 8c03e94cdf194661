//! Scans
//!
//! The scan/redemption state machine. [`decide`] looks at a snapshot of a QR code and
//! the scanning device's history and says what should happen; callers carry out the
//! side effects the decision names (recording an engagement, persisting a status
//! transition, issuing a redemption).

use jiff::Timestamp;

use crate::{
    engagements::{DeviceHistory, EngagementStatus},
    qr_codes::{QrState, QrStatus},
};

/// Result of evaluating one scan against a known QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDecision {
    /// The code is not active; a failed engagement is recorded with its status as reason.
    Ineligible {
        /// Status the code was found in.
        status: QrStatus,
    },

    /// The code has passed its expiry and must be marked expired.
    Expire,

    /// The device already claimed this offer; a duplicate engagement is recorded.
    Duplicate,

    /// The scan limit is used up and the code must be marked inactive.
    Exhaust,

    /// Issue a redemption.
    Redeem {
        /// Whether this device had never engaged with the code before.
        first_for_device: bool,
    },
}

impl ScanDecision {
    /// Status transition the caller must persist, if any.
    pub const fn transition(self) -> Option<QrStatus> {
        match self {
            ScanDecision::Expire => Some(QrStatus::Expired),
            ScanDecision::Exhaust => Some(QrStatus::Inactive),
            ScanDecision::Ineligible { .. }
            | ScanDecision::Duplicate
            | ScanDecision::Redeem { .. } => None,
        }
    }

    /// Engagement the caller must record, if any.
    pub const fn engagement(self) -> Option<EngagementStatus> {
        match self {
            ScanDecision::Ineligible { .. } => Some(EngagementStatus::Failed),
            ScanDecision::Duplicate => Some(EngagementStatus::Duplicate),
            ScanDecision::Redeem { .. } => Some(EngagementStatus::Redeemed),
            ScanDecision::Expire | ScanDecision::Exhaust => None,
        }
    }

    /// Whether the scan issues a redemption code.
    pub const fn is_redemption(self) -> bool {
        matches!(self, ScanDecision::Redeem { .. })
    }
}

/// Decide the outcome of a scan.
///
/// Checks run in a fixed order: status, expiry, prior claims by the device, scan limit.
/// A device that already claimed the offer is reported as a duplicate even when the
/// limit has since been reached.
pub fn decide(state: &QrState, history: &DeviceHistory, now: Timestamp) -> ScanDecision {
    if state.status.is_terminal() {
        return ScanDecision::Ineligible {
            status: state.status,
        };
    }

    if state.is_expired(now) {
        return ScanDecision::Expire;
    }

    if history.has_claimed() {
        return ScanDecision::Duplicate;
    }

    if state.is_exhausted() {
        return ScanDecision::Exhaust;
    }

    ScanDecision::Redeem {
        first_for_device: history.is_first_visit(),
    }
}
