use super::catalog::CatalogItem;
use super::money::Money;
use crate::error::{PaymentError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive amount of some catalog unit (kilograms, litres, pieces...).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::InvalidQuantity(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CartLine {
    pub item: CatalogItem,
    pub quantity: Quantity,
}

impl CartLine {
    pub fn subtotal(&self) -> Money {
        Money::new(self.item.price.value() * self.quantity.value())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => f.write_str("Pending"),
            PaymentStatus::Paid => f.write_str("Paid"),
        }
    }
}

/// The 1-based number an order is shown and referred to by.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct OrderReference(pub usize);

impl OrderReference {
    pub fn from_position(position: usize) -> Self {
        Self(position + 1)
    }

    pub fn position(&self) -> usize {
        self.0.saturating_sub(1)
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed order.
///
/// Items and total are frozen when the order is placed; the only change an
/// order ever sees afterwards is its payment status moving from `Pending` to
/// `Paid`, which goes through [`Order::mark_paid`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    items: Vec<CartLine>,
    total: Money,
    delivery_date: NaiveDate,
    payment_status: PaymentStatus,
}

impl Order {
    pub(crate) fn new(items: Vec<CartLine>, delivery_date: NaiveDate) -> Self {
        let total = items.iter().map(CartLine::subtotal).sum();
        Self {
            items,
            total,
            delivery_date,
            payment_status: PaymentStatus::Pending,
        }
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn delivery_date(&self) -> NaiveDate {
        self.delivery_date
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    pub(crate) fn mark_paid(&mut self, reference: OrderReference) -> Result<()> {
        match self.payment_status {
            PaymentStatus::Pending => {
                self.payment_status = PaymentStatus::Paid;
                Ok(())
            }
            PaymentStatus::Paid => Err(PaymentError::AlreadyPaid(reference)),
        }
    }
}
