use super::account::Account;
use super::ledger::{OrderLedger, PlacedOrder};
use super::money::Money;
use super::order::{Order, OrderReference};
use crate::error::{PaymentError, Result};
use chrono::NaiveDate;

/// Everything one shopper's checkout touches: their account and their ledger.
///
/// The settlement methods below are the only code that mutates both halves.
/// Each one re-checks its preconditions first, so a settlement either applies
/// the ledger and balance changes together or changes nothing.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Storefront {
    pub account: Account,
    pub ledger: OrderLedger,
}

impl Storefront {
    pub fn new(account: Account) -> Self {
        Self {
            account,
            ledger: OrderLedger::new(),
        }
    }

    /// Places the cart as a paid order and debits `charge`.
    pub fn settle_card_payment(&mut self, charge: Money, today: NaiveDate) -> Result<PlacedOrder> {
        if self.ledger.is_cart_empty() {
            return Err(PaymentError::EmptyCart);
        }
        self.account.ensure_funds(charge)?;

        let mut placed = self
            .ledger
            .place_order_on(today)
            .ok_or(PaymentError::EmptyCart)?;
        let position = placed.reference.position();
        placed.order = self.ledger.mark_paid(position)?.clone();
        self.account.debit(charge)?;

        Ok(placed)
    }

    /// Places the cart as an order that will be paid for on delivery.
    pub fn settle_on_delivery(&mut self, today: NaiveDate) -> Result<PlacedOrder> {
        self.ledger
            .place_order_on(today)
            .ok_or(PaymentError::EmptyCart)
    }

    /// Pays off a pending order from the card balance.
    pub fn settle_delivery_payment(&mut self, position: usize) -> Result<(OrderReference, Order)> {
        let order = self.ledger.order(position)?;
        let reference = OrderReference::from_position(position);
        if order.is_paid() {
            return Err(PaymentError::AlreadyPaid(reference));
        }
        let charge = order.total();
        self.account.ensure_funds(charge)?;

        let order = self.ledger.mark_paid(position)?.clone();
        self.account.debit(charge)?;

        Ok((reference, order))
    }
}
