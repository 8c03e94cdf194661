//! QR Code Handlers

pub(crate) mod deactivate;
pub(crate) mod generate;
pub(crate) mod get;
