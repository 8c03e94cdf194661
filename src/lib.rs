//! Beyond
//!
//! Beyond is the domain engine behind Beyond Trips QR engagements: campaign QR code
//! statuses, the scan/redemption state machine, code generation and campaign analytics.
//! It performs no I/O; persistence and transport live in the `beyond-app` and
//! `beyond-json` crates.

pub mod analytics;
pub mod codes;
pub mod engagements;
pub mod prelude;
pub mod qr_codes;
pub mod scans;
