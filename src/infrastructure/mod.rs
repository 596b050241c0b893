//! Adapters behind the domain ports: notifier implementations and the
//! shared in-memory storefront.

pub mod file;
pub mod in_memory;
pub mod log;
