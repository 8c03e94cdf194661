//! Advertisers

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod tokens;

pub use errors::AdvertisersServiceError;
pub use service::*;
