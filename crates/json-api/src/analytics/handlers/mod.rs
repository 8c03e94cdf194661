//! Analytics Handlers

pub(crate) mod get;
