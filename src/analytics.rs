//! Analytics
//!
//! Campaign analytics derived from stored counters. Nothing here recounts the ledger.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::engagements::EngagementStatus;

/// Number of leading device identifier characters kept when reporting scans.
pub const DEVICE_ID_VISIBLE_CHARS: usize = 8;

/// Number of most recent scans included in campaign analytics.
pub const RECENT_SCANS_LIMIT: u32 = 10;

/// Percentage of scans that were redeemed, rounded half away from zero to 2 places.
///
/// Zero scans yield a rate of zero.
pub fn conversion_rate(total_scans: u64, redemptions: u64) -> Decimal {
    if total_scans == 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(redemptions) * Decimal::ONE_HUNDRED / Decimal::from(total_scans))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Shorten a device identifier for display.
pub fn truncate_device_id(device_id: &str) -> String {
    let visible: String = device_id.chars().take(DEVICE_ID_VISIBLE_CHARS).collect();

    format!("{visible}...")
}

/// Engagement counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    /// `scanned` engagements.
    pub scanned: u64,

    /// `duplicate` engagements.
    pub duplicate: u64,

    /// `redeemed` engagements.
    pub redeemed: u64,

    /// `failed` engagements.
    pub failed: u64,
}

impl StatusBreakdown {
    /// Add `count` engagements of `status`.
    pub fn add(&mut self, status: EngagementStatus, count: u64) {
        let slot = match status {
            EngagementStatus::Scanned => &mut self.scanned,
            EngagementStatus::Duplicate => &mut self.duplicate,
            EngagementStatus::Redeemed => &mut self.redeemed,
            EngagementStatus::Failed => &mut self.failed,
        };

        *slot += count;
    }

    /// Count for one status.
    pub const fn get(&self, status: EngagementStatus) -> u64 {
        match status {
            EngagementStatus::Scanned => self.scanned,
            EngagementStatus::Duplicate => self.duplicate,
            EngagementStatus::Redeemed => self.redeemed,
            EngagementStatus::Failed => self.failed,
        }
    }

    /// Engagements across all statuses.
    pub const fn total(&self) -> u64 {
        self.scanned + self.duplicate + self.redeemed + self.failed
    }
}

impl FromIterator<(EngagementStatus, u64)> for StatusBreakdown {
    fn from_iter<I: IntoIterator<Item = (EngagementStatus, u64)>>(iter: I) -> Self {
        let mut breakdown = Self::default();

        for (status, count) in iter {
            breakdown.add(status, count);
        }

        breakdown
    }
}
