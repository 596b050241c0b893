use super::catalog::CatalogItem;
use super::money::{MAX_AMOUNT, Money};
use super::order::{CartLine, Order, OrderReference, Quantity};
use crate::error::{PaymentError, Result};
use chrono::{Days, Local, NaiveDate};

/// Days between placing an order and its estimated delivery.
pub const DELIVERY_OFFSET_DAYS: u64 = 3;

/// An order that was just placed, together with its reference number.
#[derive(Debug, PartialEq, Clone)]
pub struct PlacedOrder {
    pub reference: OrderReference,
    pub order: Order,
}

/// The working cart and the append-only list of placed orders.
///
/// Placing an order is the only way lines leave the cart and the only way an
/// order enters the ledger; both happen inside [`OrderLedger::place_order_on`].
#[derive(Debug, Default, PartialEq, Clone)]
pub struct OrderLedger {
    cart: Vec<CartLine>,
    orders: Vec<Order>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line to the cart.
    ///
    /// Fails with `CartLimit`, leaving the cart as it was, when the line would
    /// push the cart total past [`MAX_AMOUNT`]. Every cart total, and so every
    /// order total, therefore fits.
    pub fn add(&mut self, item: CatalogItem, quantity: Quantity) -> Result<()> {
        let within_limit = item
            .price
            .value()
            .checked_mul(quantity.value())
            .and_then(|subtotal| self.cart_total().checked_add(Money::new(subtotal)))
            .is_some_and(|total| total.value() <= MAX_AMOUNT);
        if !within_limit {
            return Err(PaymentError::CartLimit(item.name));
        }
        self.cart.push(CartLine { item, quantity });
        Ok(())
    }

    /// Removes the cart line at `position`, shifting later lines down.
    ///
    /// Out-of-range positions are ignored and `None` is returned.
    pub fn remove_at(&mut self, position: usize) -> Option<CartLine> {
        if position < self.cart.len() {
            Some(self.cart.remove(position))
        } else {
            None
        }
    }

    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Live total of the cart in base currency.
    pub fn cart_total(&self) -> Money {
        self.cart.iter().map(CartLine::subtotal).sum()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, position: usize) -> Result<&Order> {
        self.orders.get(position).ok_or(PaymentError::InvalidSelection {
            position,
            len: self.orders.len(),
        })
    }

    /// Places an order dated from today's local date.
    pub fn place_order(&mut self) -> Option<PlacedOrder> {
        self.place_order_on(Local::now().date_naive())
    }

    /// Snapshots the cart into a pending order and clears the cart.
    ///
    /// Returns `None`, leaving everything untouched, when the cart is empty.
    pub fn place_order_on(&mut self, today: NaiveDate) -> Option<PlacedOrder> {
        if self.cart.is_empty() {
            return None;
        }

        let delivery_date = today
            .checked_add_days(Days::new(DELIVERY_OFFSET_DAYS))
            .unwrap_or(NaiveDate::MAX);
        let order = Order::new(std::mem::take(&mut self.cart), delivery_date);
        self.orders.push(order.clone());

        Some(PlacedOrder {
            reference: OrderReference(self.orders.len()),
            order,
        })
    }

    /// Moves the order at `position` from `Pending` to `Paid`.
    pub fn mark_paid(&mut self, position: usize) -> Result<&Order> {
        let len = self.orders.len();
        let order = self
            .orders
            .get_mut(position)
            .ok_or(PaymentError::InvalidSelection { position, len })?;
        order.mark_paid(OrderReference::from_position(position))?;
        Ok(order)
    }
}
