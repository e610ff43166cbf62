// Copyright (c) 2026 SmartImport. All rights reserved.
// SmartImport Simulation Engine - Landed Cost Calculator

//! Landed-cost pipeline: currency conversion, cascading import taxes,
//! logistics aggregation, markup-based profitability.
//!
//! The tax sequence is deliberate tax-on-tax policy: each base includes
//! amounts computed in earlier steps. PIS and COFINS share the same base
//! (FOB + II + IPI) and do not compound on each other; the ICMS base
//! includes both. ICMS uses the plain multiplicative formula, not the
//! `1/(1 - rate)` gross-up.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::{Brl, ExchangeRate, ForeignMoney, Percent};

/// Markup applied to CMV when deriving the selling price. Policy constant,
/// not a user input.
pub const DEFAULT_MARKUP: Percent = Percent(dec!(30));

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised before any arithmetic runs. Out-of-range but finite values
/// (a negative rate, say) are not errors: they propagate through the
/// pipeline and produce correspondingly signed amounts.
#[derive(Debug, thiserror::Error)]
pub enum CalculationError {
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("exchange rate must be positive, got {0}")]
    NonPositiveExchangeRate(Decimal),
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Externally supplied tax rates. Rate resolution (NCM lookup, state
/// tables) happens upstream; the engine only applies them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRates {
    pub ii_rate: Percent,
    pub ipi_rate: Percent,
    pub pis_rate: Percent,
    pub cofins_rate: Percent,
    pub icms_rate: Percent,
}

impl TaxRates {
    pub fn zero() -> Self {
        Self {
            ii_rate: Percent::zero(),
            ipi_rate: Percent::zero(),
            pis_rate: Percent::zero(),
            cofins_rate: Percent::zero(),
            icms_rate: Percent::zero(),
        }
    }
}

/// Value inputs of one simulation. FOB, freight and insurance are in the
/// operation's foreign currency; the four logistics surcharges are already
/// in BRL and bypass conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    pub fob_value: ForeignMoney,
    pub freight_value: ForeignMoney,
    pub insurance_value: ForeignMoney,
    pub exchange_rate: ExchangeRate,
    pub afrmm_value: Brl,
    pub thc_value: Brl,
    pub storage_value: Brl,
    pub handling_value: Brl,
    #[serde(flatten)]
    pub rates: TaxRates,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            fob_value: ForeignMoney::zero(),
            freight_value: ForeignMoney::zero(),
            insurance_value: ForeignMoney::zero(),
            // Prefilled USD/BRL reference rate the dashboard ships with
            exchange_rate: ExchangeRate(dec!(5.5)),
            afrmm_value: Brl::zero(),
            thc_value: Brl::zero(),
            storage_value: Brl::zero(),
            handling_value: Brl::zero(),
            rates: TaxRates::zero(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// The five computed tax amounts, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub ii_value: Brl,
    pub ipi_value: Brl,
    pub pis_value: Brl,
    pub cofins_value: Brl,
    pub icms_value: Brl,
}

impl TaxBreakdown {
    pub fn total(&self) -> Brl {
        self.ii_value + self.ipi_value + self.pis_value + self.cofins_value + self.icms_value
    }
}

/// Everything derived from one calculator run, in BRL unless a percentage.
///
/// `profitability` is `None` when CMV is zero or negative -- the margin is
/// undefined there and the dashboard renders it as "not applicable".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub fob_brl: Brl,
    pub freight_brl: Brl,
    pub insurance_brl: Brl,
    #[serde(flatten)]
    pub taxes: TaxBreakdown,
    pub total_taxes: Brl,
    pub total_logistics: Brl,
    pub total_costs: Brl,
    pub landed_cost: Brl,
    pub cmv: Brl,
    pub markup: Percent,
    pub selling_price: Brl,
    pub profitability: Option<Percent>,
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Run the landed-cost pipeline over one set of inputs.
///
/// Pure and deterministic: no I/O, no clock, no shared state. Identical
/// inputs produce value-identical results, so the function is safe to call
/// from any number of callers concurrently.
pub fn calculate(input: &SimulationInput) -> Result<SimulationResult, CalculationError> {
    if !input.exchange_rate.is_positive() {
        return Err(CalculationError::NonPositiveExchangeRate(
            input.exchange_rate.0,
        ));
    }

    let fob_brl = input.exchange_rate.convert(input.fob_value);
    let freight_brl = input.exchange_rate.convert(input.freight_value);
    let insurance_brl = input.exchange_rate.convert(input.insurance_value);

    let ii_value = input.rates.ii_rate.of(fob_brl);
    let ipi_value = input.rates.ipi_rate.of(fob_brl + ii_value);

    // PIS and COFINS are both assessed on FOB + II + IPI, independently.
    let federal_base = fob_brl + ii_value + ipi_value;
    let pis_value = input.rates.pis_rate.of(federal_base);
    let cofins_value = input.rates.cofins_rate.of(federal_base);

    let icms_value = input
        .rates
        .icms_rate
        .of(federal_base + pis_value + cofins_value);

    let taxes = TaxBreakdown {
        ii_value,
        ipi_value,
        pis_value,
        cofins_value,
        icms_value,
    };
    let total_taxes = taxes.total();

    let total_logistics = freight_brl
        + insurance_brl
        + input.afrmm_value
        + input.thc_value
        + input.storage_value
        + input.handling_value;
    let total_costs = total_taxes + total_logistics;
    let landed_cost = fob_brl + total_costs;

    let cmv = landed_cost;
    let markup = DEFAULT_MARKUP;
    let selling_price = Brl(cmv.0 * (Decimal::ONE + markup.0 / dec!(100)));
    let profitability = if cmv.is_positive() {
        Some(Percent(
            (selling_price.0 - cmv.0) / selling_price.0 * dec!(100),
        ))
    } else {
        None
    };

    Ok(SimulationResult {
        fob_brl,
        freight_brl,
        insurance_brl,
        taxes,
        total_taxes,
        total_logistics,
        total_costs,
        landed_cost,
        cmv,
        markup,
        selling_price,
        profitability,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_input() -> SimulationInput {
        SimulationInput {
            fob_value: ForeignMoney(dec!(1000)),
            freight_value: ForeignMoney(dec!(100)),
            insurance_value: ForeignMoney(dec!(20)),
            exchange_rate: ExchangeRate(dec!(5.0)),
            afrmm_value: Brl::zero(),
            thc_value: Brl::zero(),
            storage_value: Brl::zero(),
            handling_value: Brl::zero(),
            rates: TaxRates {
                ii_rate: Percent(dec!(10)),
                ipi_rate: Percent(dec!(5)),
                pis_rate: Percent(dec!(1.65)),
                cofins_rate: Percent(dec!(7.6)),
                icms_rate: Percent(dec!(18)),
            },
        }
    }

    #[test]
    fn reference_operation_exact_values() {
        let result = calculate(&reference_input()).expect("test: reference input is valid");

        assert_eq!(result.fob_brl, Brl(dec!(5000)));
        assert_eq!(result.freight_brl, Brl(dec!(500)));
        assert_eq!(result.insurance_brl, Brl(dec!(100)));

        assert_eq!(result.taxes.ii_value, Brl(dec!(500)));
        assert_eq!(result.taxes.ipi_value, Brl(dec!(275)));
        // PIS/COFINS base: 5000 + 500 + 275 = 5775
        assert_eq!(result.taxes.pis_value, Brl(dec!(95.2875)));
        assert_eq!(result.taxes.cofins_value, Brl(dec!(438.90)));
        // ICMS base: 5775 + 95.2875 + 438.90 = 6309.1875
        assert_eq!(result.taxes.icms_value, Brl(dec!(1135.65375)));

        assert_eq!(result.total_taxes, Brl(dec!(2444.84125)));
        assert_eq!(result.total_logistics, Brl(dec!(600)));
        assert_eq!(result.total_costs, Brl(dec!(3044.84125)));
        assert_eq!(result.landed_cost, Brl(dec!(8044.84125)));
        assert_eq!(result.cmv, result.landed_cost);
        assert_eq!(result.markup, Percent(dec!(30)));
    }

    #[test]
    fn profitability_constant_under_fixed_markup() {
        // ((1.3c - c) / 1.3c) * 100 depends only on the markup ratio, so
        // every operation with positive CMV lands on the same margin.
        let small = calculate(&reference_input()).expect("test: valid input");

        let mut big_input = reference_input();
        big_input.fob_value = ForeignMoney(dec!(987654));
        let big = calculate(&big_input).expect("test: valid input");

        let p_small = small.profitability.expect("test: positive CMV").0;
        let p_big = big.profitability.expect("test: positive CMV").0;
        assert_eq!(p_small.round_dp(10), p_big.round_dp(10));
        assert_eq!(p_small.round_dp(4), dec!(23.0769));
    }

    #[test]
    fn zero_rates_zero_taxes() {
        let mut input = reference_input();
        input.rates = TaxRates::zero();
        let result = calculate(&input).expect("test: valid input");

        assert!(result.total_taxes.is_zero());
        assert_eq!(
            result.landed_cost,
            result.fob_brl + result.total_logistics
        );
    }

    #[test]
    fn pipeline_linear_in_foreign_values() {
        let base = calculate(&reference_input()).expect("test: valid input");

        let k = dec!(3);
        let mut scaled_input = reference_input();
        scaled_input.fob_value = ForeignMoney(dec!(1000) * k);
        scaled_input.freight_value = ForeignMoney(dec!(100) * k);
        scaled_input.insurance_value = ForeignMoney(dec!(20) * k);
        let scaled = calculate(&scaled_input).expect("test: valid input");

        assert_eq!(scaled.fob_brl.0, base.fob_brl.0 * k);
        assert_eq!(scaled.freight_brl.0, base.freight_brl.0 * k);
        assert_eq!(scaled.insurance_brl.0, base.insurance_brl.0 * k);
        assert_eq!(scaled.taxes.ii_value.0, base.taxes.ii_value.0 * k);
        assert_eq!(scaled.taxes.ipi_value.0, base.taxes.ipi_value.0 * k);
        assert_eq!(scaled.taxes.pis_value.0, base.taxes.pis_value.0 * k);
        assert_eq!(scaled.taxes.cofins_value.0, base.taxes.cofins_value.0 * k);
        assert_eq!(scaled.taxes.icms_value.0, base.taxes.icms_value.0 * k);
        assert_eq!(scaled.total_taxes.0, base.total_taxes.0 * k);
    }

    #[test]
    fn nonnegative_inputs_nonnegative_outputs() {
        let result = calculate(&reference_input()).expect("test: valid input");
        for tax in [
            result.taxes.ii_value,
            result.taxes.ipi_value,
            result.taxes.pis_value,
            result.taxes.cofins_value,
            result.taxes.icms_value,
        ] {
            assert!(tax.0 >= Decimal::ZERO, "negative tax: {tax}");
        }
        assert!(result.landed_cost.0 >= Decimal::ZERO);
    }

    #[test]
    fn pis_and_cofins_share_a_base() {
        // Equal rates must yield equal amounts -- COFINS does not see PIS.
        let mut input = reference_input();
        input.rates.pis_rate = Percent(dec!(4));
        input.rates.cofins_rate = Percent(dec!(4));
        let result = calculate(&input).expect("test: valid input");
        assert_eq!(result.taxes.pis_value, result.taxes.cofins_value);
    }

    #[test]
    fn icms_base_includes_pis_and_cofins() {
        let result = calculate(&reference_input()).expect("test: valid input");
        let federal_base = result.fob_brl + result.taxes.ii_value + result.taxes.ipi_value;
        let expected = Percent(dec!(18)).of(
            federal_base + result.taxes.pis_value + result.taxes.cofins_value,
        );
        assert_eq!(result.taxes.icms_value, expected);
    }

    #[test]
    fn negative_rate_propagates() {
        let mut input = reference_input();
        input.rates.ii_rate = Percent(dec!(-10));
        let result = calculate(&input).expect("test: valid input");
        assert_eq!(result.taxes.ii_value, Brl(dec!(-500)));
    }

    #[test]
    fn zero_cmv_profitability_not_applicable() {
        let input = SimulationInput::default();
        let result = calculate(&input).expect("test: all-zero input is valid");
        assert!(result.cmv.is_zero());
        assert!(result.profitability.is_none());
        assert!(result.selling_price.is_zero());
    }

    #[test]
    fn rejects_non_positive_exchange_rate() {
        let mut input = reference_input();
        input.exchange_rate = ExchangeRate(Decimal::ZERO);
        let err = calculate(&input);
        assert!(
            matches!(err, Err(CalculationError::NonPositiveExchangeRate(_))),
            "expected NonPositiveExchangeRate, got {err:?}"
        );

        input.exchange_rate = ExchangeRate(dec!(-5));
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn deterministic_across_invocations() {
        let input = reference_input();
        let first = calculate(&input).expect("test: valid input");
        let second = calculate(&input).expect("test: valid input");
        assert_eq!(first, second);
    }

    #[test]
    fn logistics_surcharges_skip_conversion() {
        let mut input = reference_input();
        input.afrmm_value = Brl(dec!(80));
        input.thc_value = Brl(dec!(45));
        input.storage_value = Brl(dec!(30));
        input.handling_value = Brl(dec!(25));
        let result = calculate(&input).expect("test: valid input");
        // 500 + 100 converted logistics, plus 180 of flat BRL surcharges
        assert_eq!(result.total_logistics, Brl(dec!(780)));
    }
}
