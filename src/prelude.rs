//! Beyond prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    analytics::{StatusBreakdown, conversion_rate, truncate_device_id},
    codes::{is_redemption_code, qr_code_id, redemption_code},
    engagements::{DeviceHistory, EngagementStatus},
    qr_codes::{QrState, QrStatus, UnknownStatusError},
    scans::{ScanDecision, decide},
};
