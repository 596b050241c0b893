use crate::domain::account::CardField;
use crate::domain::money::Money;
use crate::domain::order::OrderReference;
use miette::Diagnostic;
use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug, Diagnostic)]
pub enum PaymentError {
    #[error("Invalid {field}. {}", .field.requirement())]
    #[diagnostic(code(storefront::validation))]
    Validation { field: CardField },

    #[error("Insufficient funds. Your balance is {available}, but the total is {required}.")]
    #[diagnostic(code(storefront::insufficient_funds))]
    InsufficientFunds { required: Money, available: Money },

    #[error("Your cart is empty.")]
    #[diagnostic(code(storefront::empty_cart))]
    EmptyCart,

    #[error("Invalid order selected: position {position}, ledger holds {len}.")]
    #[diagnostic(code(storefront::invalid_selection))]
    InvalidSelection { position: usize, len: usize },

    #[error("Payment already completed for order {0}.")]
    #[diagnostic(code(storefront::already_paid))]
    AlreadyPaid(OrderReference),

    #[error("Notification failed: {0}")]
    #[diagnostic(code(storefront::notification), severity(Warning))]
    NotificationFailure(String),

    #[error("Quantity must be greater than zero, got {0}.")]
    #[diagnostic(code(storefront::invalid_quantity))]
    InvalidQuantity(Decimal),

    #[error("Payment total cannot be negative, got {0}.")]
    #[diagnostic(code(storefront::invalid_amount))]
    InvalidAmount(Decimal),

    #[error("Amount {0} is outside the supported range.")]
    #[diagnostic(code(storefront::amount_out_of_range))]
    AmountOutOfRange(Decimal),

    #[error("Adding {0} would take the cart total past the supported maximum.")]
    #[diagnostic(code(storefront::cart_limit))]
    CartLimit(String),

    #[error("Unknown catalog item: {0}")]
    #[diagnostic(code(storefront::unknown_item))]
    UnknownItem(String),

    #[error("Unknown currency: {0}")]
    #[diagnostic(code(storefront::unknown_currency), help("use INR or USD"))]
    UnknownCurrency(String),

    #[error("Invalid session command: {0}")]
    #[diagnostic(code(storefront::session))]
    Session(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(storefront::config))]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PaymentError {
    /// Soft failures ride along with a committed payment instead of aborting it.
    pub fn is_warning(&self) -> bool {
        matches!(self, PaymentError::NotificationFailure(_))
    }
}
