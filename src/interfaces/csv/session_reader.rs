use crate::domain::account::CardInput;
use crate::domain::money::Currency;
use crate::domain::order::Quantity;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Add,
    Remove,
    Currency,
    PayNow,
    PayForDelivery,
    PayOnDelivery,
    CompletePayment,
}

/// One row of a session script.
///
/// Columns: `action,item,quantity,position,currency,card_number,expiry,cvv`.
/// Which columns matter depends on the action; the rest may be left blank
/// or omitted.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct SessionRecord {
    pub action: ActionType,
    pub item: Option<String>,
    pub quantity: Option<Decimal>,
    pub position: Option<usize>,
    pub currency: Option<Currency>,
    pub card_number: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
}

/// A shopper action, checked for the fields it needs.
#[derive(Debug, PartialEq, Clone)]
pub enum SessionAction {
    Add { item: String, quantity: Quantity },
    /// 0-based cart position.
    Remove { position: usize },
    /// Switch to the given currency, or toggle when none is given.
    Currency(Option<Currency>),
    PayNow(CardInput),
    PayForDelivery(CardInput),
    PayOnDelivery,
    /// 0-based ledger position of the order to settle.
    CompletePayment { position: usize },
}

impl TryFrom<SessionRecord> for SessionAction {
    type Error = PaymentError;

    fn try_from(record: SessionRecord) -> Result<Self> {
        let action = match record.action {
            ActionType::Add => SessionAction::Add {
                item: record.item.ok_or_else(|| missing("add", "item"))?,
                quantity: Quantity::new(
                    record.quantity.ok_or_else(|| missing("add", "quantity"))?,
                )?,
            },
            ActionType::Remove => SessionAction::Remove {
                position: record.position.ok_or_else(|| missing("remove", "position"))?,
            },
            ActionType::Currency => SessionAction::Currency(record.currency),
            ActionType::PayNow => {
                SessionAction::PayNow(card(record.card_number, record.expiry, record.cvv))
            }
            ActionType::PayForDelivery => {
                SessionAction::PayForDelivery(card(record.card_number, record.expiry, record.cvv))
            }
            ActionType::PayOnDelivery => SessionAction::PayOnDelivery,
            ActionType::CompletePayment => SessionAction::CompletePayment {
                position: record
                    .position
                    .ok_or_else(|| missing("complete_payment", "position"))?,
            },
        };
        Ok(action)
    }
}

fn missing(action: &str, column: &str) -> PaymentError {
    PaymentError::Session(format!("{action} requires a {column}"))
}

/// Blank card columns are passed on as empty strings so that card validation,
/// not the reader, reports them.
fn card(number: Option<String>, expiry: Option<String>, cvv: Option<String>) -> CardInput {
    CardInput::new(
        number.unwrap_or_default(),
        expiry.unwrap_or_default(),
        cvv.unwrap_or_default(),
    )
}

/// Reads shopper actions from a CSV source.
pub struct SessionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SessionReader<R> {
    /// Creates a new `SessionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and checks each action.
    ///
    /// A bad row yields an `Err` for that row only; reading continues.
    pub fn actions(self) -> impl Iterator<Item = Result<SessionAction>> {
        self.reader.into_deserialize().map(|result| -> Result<SessionAction> {
            let record: SessionRecord = result?;
            SessionAction::try_from(record)
        })
    }
}
