//! Adapter layer: converts between the dashboard's f64 world and the
//! engine's Decimal types.
//!
//! Conversion is strict rather than lossy: a NaN or infinite value coming
//! over the boundary is a typed [`CalculationError`], never silently
//! coerced to zero.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::calculator::CalculationError;
use crate::money::{Brl, ExchangeRate, ForeignMoney, Percent};

/// Convert an f64 field to Decimal, rejecting non-finite values.
pub fn to_decimal(field: &'static str, v: f64) -> Result<Decimal, CalculationError> {
    if !v.is_finite() {
        return Err(CalculationError::NonFinite { field });
    }
    Decimal::from_f64(v).ok_or(CalculationError::NonFinite { field })
}

/// Convert Decimal to f64 for display-side consumers.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

pub fn foreign(field: &'static str, v: f64) -> Result<ForeignMoney, CalculationError> {
    Ok(ForeignMoney(to_decimal(field, v)?))
}

pub fn brl(field: &'static str, v: f64) -> Result<Brl, CalculationError> {
    Ok(Brl(to_decimal(field, v)?))
}

pub fn exchange_rate(field: &'static str, v: f64) -> Result<ExchangeRate, CalculationError> {
    Ok(ExchangeRate(to_decimal(field, v)?))
}

pub fn percent(field: &'static str, v: f64) -> Result<Percent, CalculationError> {
    Ok(Percent(to_decimal(field, v)?))
}
