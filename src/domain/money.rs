use crate::error::{PaymentError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// Rupees per dollar used when no rate is configured.
pub const DEFAULT_USD_TO_INR: Decimal = dec!(83);

/// Minor-unit precision of the base currency (paise).
const BASE_MINOR_UNITS: u32 = 2;

/// Largest cart or order total the ledger accepts, in the base currency.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000000);

/// Accepted exchange rates, in rupees per dollar.
pub const MIN_RATE: Decimal = dec!(0.0001);
pub const MAX_RATE: Decimal = dec!(1000000);

/// The currencies amounts can be displayed in.
///
/// `Inr` is the base currency: every stored price, balance and order total is
/// expressed in it. `Usd` only ever exists at the display boundary.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
}

impl Currency {
    pub const BASE: Self = Currency::Inr;

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
        }
    }

    /// The other currency, as flipped by the currency toggle.
    pub fn toggled(&self) -> Self {
        match self {
            Currency::Inr => Currency::Usd,
            Currency::Usd => Currency::Inr,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            _ => Err(PaymentError::UnknownCurrency(s.to_string())),
        }
    }
}

/// A monetary value in the base currency.
///
/// Wraps `rust_decimal::Decimal` so base-currency amounts cannot be mixed up
/// with display amounts, which stay plain `Decimal`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Rounds to whole paise, half away from zero.
    pub fn round_to_minor(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(BASE_MINOR_UNITS, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", Currency::BASE.symbol(), self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Fixed conversion rate between the base currency and the alternate one,
/// expressed as base units per alternate unit (rupees per dollar).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    pub fn new(rate: Decimal) -> Result<Self> {
        if rate <= Decimal::ZERO {
            return Err(PaymentError::Config(format!(
                "exchange rate must be positive, got {rate}"
            )));
        }
        if !(MIN_RATE..=MAX_RATE).contains(&rate) {
            return Err(PaymentError::Config(format!(
                "exchange rate must be between {MIN_RATE} and {MAX_RATE}, got {rate}"
            )));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Converts an amount entered in `currency` into the base currency.
    ///
    /// Base amounts pass through untouched. Converted amounts are rounded to
    /// whole paise.
    pub fn to_base(&self, amount: Decimal, currency: Currency) -> Result<Money> {
        match currency {
            Currency::Inr => Ok(Money(amount)),
            Currency::Usd => amount
                .checked_mul(self.0)
                .map(|base| Money(base).round_to_minor())
                .ok_or(PaymentError::AmountOutOfRange(amount)),
        }
    }

    /// Converts a stored base amount for display in `currency`.
    ///
    /// The result is unrounded; formatting decides the precision shown.
    pub fn to_display(&self, amount: Money, currency: Currency) -> Decimal {
        match currency {
            Currency::Inr => amount.0,
            Currency::Usd => amount.0 / self.0,
        }
    }

    /// Formats a base amount in `currency` with its symbol, e.g. `$7.23`.
    pub fn format(&self, amount: Money, currency: Currency) -> String {
        format!("{}{:.2}", currency.symbol(), self.to_display(amount, currency))
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self(DEFAULT_USD_TO_INR)
    }
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(10.50));
        let b = Money::new(dec!(0.25));
        assert_eq!(a + b, Money::new(dec!(10.75)));
        assert_eq!(a - b, Money::new(dec!(10.25)));
        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total, Money::new(dec!(11.00)));
    }

    #[test]
    fn test_money_display_uses_base_symbol() {
        assert_eq!(Money::new(dec!(1500)).to_string(), "₹1500.00");
        assert_eq!(Money::new(dec!(0.005)).round_to_minor().to_string(), "₹0.01");
    }

    #[test]
    fn test_exchange_rate_must_be_positive() {
        assert!(ExchangeRate::new(dec!(83)).is_ok());
        assert!(matches!(
            ExchangeRate::new(dec!(0)),
            Err(PaymentError::Config(_))
        ));
        assert!(matches!(
            ExchangeRate::new(dec!(-1)),
            Err(PaymentError::Config(_))
        ));
        assert!(ExchangeRate::new(MAX_RATE).is_ok());
        assert!(matches!(
            ExchangeRate::new(dec!(0.00001)),
            Err(PaymentError::Config(_))
        ));
    }

    #[test]
    fn test_huge_display_amount_does_not_overflow() {
        let rate = ExchangeRate::new(MAX_RATE).unwrap();
        assert!(matches!(
            rate.to_base(Decimal::MAX, Currency::Usd),
            Err(PaymentError::AmountOutOfRange(_))
        ));
        assert_eq!(
            Money::new(Decimal::MAX).checked_add(Money::new(dec!(1))),
            None
        );
    }

    #[test]
    fn test_base_currency_is_not_converted() {
        let rate = ExchangeRate::default();
        assert_eq!(rate.to_base(dec!(600), Currency::Inr).unwrap(), Money::new(dec!(600)));
        // fractional paise stay exact in the base currency
        assert_eq!(
            rate.to_base(dec!(149.985), Currency::Inr).unwrap().value(),
            dec!(149.985)
        );
        assert_eq!(rate.to_display(Money::new(dec!(600)), Currency::Inr), dec!(600));
    }

    #[test]
    fn test_usd_converts_through_rate() {
        let rate = ExchangeRate::new(dec!(80)).unwrap();
        assert_eq!(rate.to_base(dec!(7.5), Currency::Usd).unwrap(), Money::new(dec!(600)));
        assert_eq!(rate.to_display(Money::new(dec!(600)), Currency::Usd), dec!(7.5));
        assert_eq!(rate.format(Money::new(dec!(600)), Currency::Usd), "$7.50");
    }

    #[test]
    fn test_currency_round_trip_within_tolerance() {
        let rate = ExchangeRate::default();
        for value in [dec!(600), dec!(1499.99), dec!(0.01), dec!(123456.78)] {
            let stored = Money::new(value);
            let shown = rate.to_display(stored, Currency::Usd);
            let back = rate.to_base(shown, Currency::Usd).unwrap();
            assert!((back.value() - value).abs() <= dec!(0.0001), "{value} -> {back}");
            // display conversion is a pure function of the stored value
            assert_eq!(stored, Money::new(value));
        }
    }

    #[test]
    fn test_currency_parsing_and_toggle() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" INR ".parse::<Currency>().unwrap(), Currency::Inr);
        assert!(matches!(
            "EUR".parse::<Currency>(),
            Err(PaymentError::UnknownCurrency(_))
        ));
        assert_eq!(Currency::Inr.toggled(), Currency::Usd);
        assert_eq!(Currency::Usd.toggled(), Currency::Inr);
    }

    #[test]
    fn test_currency_serialization() {
        let json = serde_json::to_string(&Currency::Usd).unwrap();
        assert_eq!(json, "\"USD\"");
        let rate: ExchangeRate = serde_json::from_str("\"82.5\"").unwrap();
        assert_eq!(rate.value(), dec!(82.5));
        assert!(serde_json::from_str::<ExchangeRate>("\"0\"").is_err());
    }
}
