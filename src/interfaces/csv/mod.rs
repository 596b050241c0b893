//! CSV adapters: the catalog and session inputs, and the order report.

pub mod catalog_reader;
pub mod order_writer;
pub mod session_reader;
