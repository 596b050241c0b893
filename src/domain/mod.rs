//! Domain model: catalog data, the cart/order ledger, the shopper's account,
//! and the notifier port the application layer talks to.

pub mod account;
pub mod catalog;
pub mod ledger;
pub mod money;
pub mod notification;
pub mod order;
pub mod ports;
pub mod storefront;
