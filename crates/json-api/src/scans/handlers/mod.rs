//! Scan Handlers

pub(crate) mod create;
