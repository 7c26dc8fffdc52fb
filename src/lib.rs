//! Receipt processor: scores purchase receipts with a fixed rule set and
//! serves the awarded points by id.

pub mod api;
pub mod config;
pub mod ids;
pub mod processor;
pub mod receipt;
pub mod scoring;
pub mod store;

pub use processor::ReceiptProcessor;
