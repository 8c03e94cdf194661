//! Scans

pub mod data;
pub mod errors;
pub mod service;

pub use errors::ScansServiceError;
pub use service::*;
