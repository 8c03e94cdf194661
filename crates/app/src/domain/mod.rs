//! Beyond Domain Concerns

pub mod advertisers;
pub mod analytics;
pub mod engagements;
pub mod qr_codes;
pub mod scans;
