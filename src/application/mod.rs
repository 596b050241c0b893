//! Application layer: the checkout rules, the payment orchestrator that runs
//! them against a shared storefront, and the session driver used by the CLI.
//!
//! Checks live in `checkout` as plain functions over a `Storefront`; the
//! orchestrator adds locking, notification and the caller's continuation.

pub mod checkout;
pub mod engine;
pub mod session;
