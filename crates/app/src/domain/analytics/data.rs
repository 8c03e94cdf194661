//! Analytics Data

use beyond::analytics::{StatusBreakdown, conversion_rate};
use rust_decimal::Decimal;

use crate::domain::{engagements::records::EngagementRecord, qr_codes::records::QrCodeRecord};

/// Read-only view of one campaign's QR code performance.
#[derive(Debug, Clone)]
pub struct CampaignAnalytics {
    /// The campaign's QR code, whose counters are reported as-is.
    pub qr_code: QrCodeRecord,

    pub breakdown: StatusBreakdown,

    /// Most recent engagements, newest first.
    pub recent_scans: Vec<EngagementRecord>,
}

impl CampaignAnalytics {
    /// Redemptions as a percentage of scans.
    #[must_use]
    pub fn conversion_rate(&self) -> Decimal {
        conversion_rate(self.qr_code.scans_count, self.qr_code.redemptions_count)
    }
}
