//! Pure checkout decisions.
//!
//! Nothing in here mutates state. Each function answers "may this payment go
//! ahead, and for how much?" against a borrowed [`Storefront`], so the
//! orchestrator can run it and the settlement under the same lock.

use crate::domain::account::CardInput;
use crate::domain::money::{Currency, ExchangeRate, Money};
use crate::domain::order::OrderReference;
use crate::domain::storefront::Storefront;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::fmt;

/// The two card-backed flows. They share one contract and differ only in
/// the copy shown to the shopper.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CardFlow {
    PayNow,
    PayForDelivery,
}

impl CardFlow {
    pub fn success_message(&self) -> &'static str {
        match self {
            CardFlow::PayNow => "Payment successful! Order placed.",
            CardFlow::PayForDelivery => "Payment successful! Order placed for delivery.",
        }
    }
}

impl fmt::Display for CardFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardFlow::PayNow => f.write_str("pay now"),
            CardFlow::PayForDelivery => f.write_str("pay for delivery"),
        }
    }
}

/// Validates a card payment of `display_total` (in `currency`) and returns the
/// base-currency amount to charge.
pub fn authorize_card_payment(
    store: &Storefront,
    card: &CardInput,
    display_total: Decimal,
    currency: Currency,
    rate: &ExchangeRate,
) -> Result<Money> {
    card.validate()?;
    if display_total < Decimal::ZERO {
        return Err(PaymentError::InvalidAmount(display_total));
    }
    if store.ledger.is_cart_empty() {
        return Err(PaymentError::EmptyCart);
    }

    let charge = rate.to_base(display_total, currency)?;
    store.account.ensure_funds(charge)?;
    Ok(charge)
}

/// Pay-on-delivery skips the card and the balance; the cart just has to hold something.
pub fn authorize_on_delivery(store: &Storefront) -> Result<()> {
    if store.ledger.is_cart_empty() {
        Err(PaymentError::EmptyCart)
    } else {
        Ok(())
    }
}

/// Checks that the order at `position` exists, is still pending, and is
/// covered by the balance. Returns the amount to charge.
///
/// Order totals are stored in the base currency, so no conversion applies.
pub fn authorize_delivery_payment(store: &Storefront, position: usize) -> Result<Money> {
    let order = store.ledger.order(position)?;
    if order.is_paid() {
        return Err(PaymentError::AlreadyPaid(OrderReference::from_position(
            position,
        )));
    }
    let charge = order.total();
    store.account.ensure_funds(charge)?;
    Ok(charge)
}
