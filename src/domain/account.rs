use super::money::Money;
use crate::error::{PaymentError, Result};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The payment-form field a validation failure refers to.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CardField {
    Number,
    Expiry,
    Cvv,
}

impl CardField {
    pub fn requirement(&self) -> &'static str {
        match self {
            CardField::Number => "Must be 16 digits.",
            CardField::Expiry => "Use MM/YY format.",
            CardField::Cvv => "Must be 3 digits.",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardField::Number => f.write_str("card number"),
            CardField::Expiry => f.write_str("expiry date"),
            CardField::Cvv => f.write_str("CVV"),
        }
    }
}

/// Card details as typed into the payment form.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct CardInput {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

impl CardInput {
    pub fn new(
        number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }

    /// Checks the fields in form order and reports the first one that fails.
    pub fn validate(&self) -> Result<()> {
        if !is_digits(&self.number, 16) {
            return Err(PaymentError::Validation {
                field: CardField::Number,
            });
        }
        if !is_valid_expiry(&self.expiry) {
            return Err(PaymentError::Validation {
                field: CardField::Expiry,
            });
        }
        if !is_digits(&self.cvv, 3) {
            return Err(PaymentError::Validation {
                field: CardField::Cvv,
            });
        }
        Ok(())
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// `MM/YY` with a month between 01 and 12.
fn is_valid_expiry(value: &str) -> bool {
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    if !is_digits(month, 2) || !is_digits(year, 2) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

/// The card on file, including the simulated balance payments are drawn from.
///
/// Deserialization rejects a negative balance.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(try_from = "CardRecord")]
pub struct Card {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub balance: Money,
}

#[derive(Deserialize)]
struct CardRecord {
    number: String,
    expiry: String,
    cvv: String,
    balance: Money,
}

impl TryFrom<CardRecord> for Card {
    type Error = PaymentError;

    fn try_from(record: CardRecord) -> Result<Self> {
        if record.balance.is_negative() {
            return Err(PaymentError::Config(format!(
                "card balance cannot be negative, got {}",
                record.balance.value()
            )));
        }
        Ok(Self {
            number: record.number,
            expiry: record.expiry,
            cvv: record.cvv,
            balance: record.balance,
        })
    }
}

/// The shopper: contact details used on notices, plus the card on file.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub address: String,
    pub card: Card,
}

impl Account {
    pub fn balance(&self) -> Money {
        self.card.balance
    }

    /// Fails with `InsufficientFunds` unless the balance covers `amount`.
    pub fn ensure_funds(&self, amount: Money) -> Result<()> {
        if self.card.balance >= amount {
            Ok(())
        } else {
            Err(PaymentError::InsufficientFunds {
                required: amount,
                available: self.card.balance,
            })
        }
    }

    /// Takes `amount` off the card balance if it is covered.
    pub fn debit(&mut self, amount: Money) -> Result<()> {
        self.ensure_funds(amount)?;
        self.card.balance -= amount;
        Ok(())
    }
}

impl Default for Account {
    fn default() -> Self {
        Self {
            name: "Demo Shopper".to_string(),
            email: "shopper@example.com".to_string(),
            address: "123, MG Road, Bangalore, Karnataka, India - 560001".to_string(),
            card: Card {
                number: "1234567890123456".to_string(),
                expiry: "12/27".to_string(),
                cvv: "123".to_string(),
                balance: Money::new(dec!(100000.00)),
            },
        }
    }
}
