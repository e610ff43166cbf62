// Copyright 2026 SmartImport. All rights reserved.
// SmartImport Simulation Engine - Monetary Types

//! Monetary newtypes backed by `rust_decimal::Decimal`.
//!
//! Import operations quote goods in a foreign currency and settle costs in
//! BRL. Keeping the two in distinct types makes the conversion step explicit:
//! the only way to turn [`ForeignMoney`] into [`Brl`] is through an
//! [`ExchangeRate`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// ForeignMoney
// ---------------------------------------------------------------------------

/// An amount in the operation's foreign currency (USD, EUR, CNY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ForeignMoney(pub Decimal);

impl ForeignMoney {
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for ForeignMoney {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for ForeignMoney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Brl
// ---------------------------------------------------------------------------

/// An amount in the local settlement currency (Brazilian real).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Brl(pub Decimal);

impl Brl {
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl Add for Brl {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Brl {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl num_traits::Zero for Brl {
    fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Sum for Brl {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Brl::zero(), Add::add)
    }
}

impl fmt::Display for Brl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ExchangeRate
// ---------------------------------------------------------------------------

/// Foreign-currency-to-BRL conversion factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExchangeRate(pub Decimal);

impl ExchangeRate {
    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }

    /// Whether the rate is usable for conversion (strictly positive).
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Convert a foreign-currency amount into BRL.
    pub fn convert(&self, amount: ForeignMoney) -> Brl {
        Brl(amount.0 * self.0)
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Percent
// ---------------------------------------------------------------------------

/// A percentage on the nominal 0-100 scale (18 means 18%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percent(pub Decimal);

impl Percent {
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Apply this percentage to a BRL base amount.
    pub fn of(&self, base: Brl) -> Brl {
        Brl(base.0 * self.0 / dec!(100))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
