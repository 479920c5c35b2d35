//! Currencies and money amounts
//!
//! Only CAD and USD are supported. Amounts are kept as `Decimal` so that
//! converted totals add up exactly; display rounds to two places.

use crate::error::{PricingError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal places used when rendering amounts
pub const DISPLAY_PLACES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    Cad,
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Cad, Currency::Usd];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Cad => "CAD",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAD" => Ok(Currency::Cad),
            "USD" => Ok(Currency::Usd),
            _ => Err(PricingError::UnsupportedCurrency(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

/// An amount tagged with its currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Add two amounts of the same currency
    pub fn checked_add(self, other: Money) -> Result<Money> {
        if self.currency != other.currency {
            return Err(PricingError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        let amount = checked_add(self.amount, other.amount, "money sum")?;
        Ok(Money::new(amount, self.currency))
    }

    /// Convert into `target` using `rate` (units of target per unit of self)
    pub fn convert(self, rate: Decimal, target: Currency) -> Result<Money> {
        let amount = checked_mul(self.amount, rate, "currency conversion")?;
        Ok(Money::new(amount, target))
    }

    pub fn negate(self) -> Money {
        Money::new(-self.amount, self.currency)
    }

    /// Amount rounded half away from zero to two places
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(DISPLAY_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.rounded(), self.currency)
    }
}

pub(crate) fn checked_mul(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_mul(b).ok_or(PricingError::Overflow(what))
}

pub(crate) fn checked_add(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_add(b).ok_or(PricingError::Overflow(what))
}

pub(crate) fn checked_div(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_div(b).ok_or(PricingError::Overflow(what))
}

/// `value * pct / 100`
pub(crate) fn percent_of(value: Decimal, pct: Decimal, what: &'static str) -> Result<Decimal> {
    let scaled = checked_mul(value, pct, what)?;
    checked_div(scaled, Decimal::ONE_HUNDRED, what)
}
