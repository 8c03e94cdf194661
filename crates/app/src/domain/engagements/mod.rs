//! Engagements
//!
//! The append-only ledger of scan attempts. Rows are written by the scans service
//! and read back by analytics; nothing updates or deletes them.

pub mod data;
pub mod records;
pub(crate) mod repository;
