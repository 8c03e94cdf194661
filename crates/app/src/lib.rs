//! Persistence, services and outbound clients for the Beyond QR engagement service.

pub mod context;
pub mod database;
pub mod domain;
pub mod imaging;
pub mod storage;

#[cfg(test)]
mod test;

mod uuids;
