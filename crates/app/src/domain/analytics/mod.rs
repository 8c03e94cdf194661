//! Analytics

pub mod data;
pub mod errors;
pub mod service;

pub use errors::AnalyticsServiceError;
pub use service::*;
