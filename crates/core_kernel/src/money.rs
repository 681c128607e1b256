//! Monetary amounts with precise decimal arithmetic
//!
//! Claimed and approved figures are single-currency office ledgers, so an
//! [`Amount`] carries no currency. It does carry the one invariant every
//! monetary field on a claim shares: it is never negative.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while building an amount
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Negative amount: {0}")]
    Negative(Decimal),

    #[error("Amount not representable: {0}")]
    NotRepresentable(String),
}

/// Significant digits an `f64` round-trips through its shortest decimal form
pub const MAX_SIGNIFICANT_DIGITS: u32 = 15;

fn significant_digits(value: Decimal) -> u32 {
    match value.mantissa().unsigned_abs() {
        0 => 0,
        mantissa => mantissa.ilog10() + 1,
    }
}

/// A non-negative monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates an amount, rejecting negative values and values a REAL
    /// column could not reproduce exactly
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::Negative(value));
        }
        let value = value.normalize();
        if significant_digits(value) > MAX_SIGNIFICANT_DIGITS {
            return Err(MoneyError::NotRepresentable(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parses user input such as `"1500"`, `"1500.50"` or `"1.5e3"`
    ///
    /// Surrounding whitespace is ignored. Anything that is not a finite
    /// decimal number is rejected.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| MoneyError::InvalidAmount(trimmed.to_string()))?;
        Self::new(value)
    }

    /// Converts a stored floating point column back into an amount
    ///
    /// Reads the shortest decimal that maps to the same `f64`, which is the
    /// amount originally written for anything [`Amount::new`] accepts.
    pub fn from_f64(value: f64) -> Result<Self, MoneyError> {
        let shortest = value.to_string();
        let decimal = Decimal::from_str(&shortest)
            .map_err(|_| MoneyError::NotRepresentable(shortest))?;
        Self::new(decimal)
    }

    /// Returns the nearest `f64`, for storage in a REAL column
    pub fn to_f64(&self) -> f64 {
        self.0.to_string().parse().unwrap_or_default()
    }

    /// Returns the underlying decimal
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

/// Always rendered with two decimal places
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}",
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        )
    }
}
