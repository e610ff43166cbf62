// Copyright 2026 SmartImport. All rights reserved.
// SmartImport Simulation Engine - Type Definitions

use serde::{Deserialize, Serialize};

use crate::calculator::{SimulationInput, SimulationResult};
use crate::money::{Brl, Percent};

// ─── Currency ────────────────────────────────────────────────────────────────

/// Quote currency of the import operation. The engine never looks rates up;
/// the matching exchange rate arrives resolved from the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Cny,
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Cny => "¥",
        }
    }
}

// ─── Transport Mode ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Maritime,
    Air,
    Land,
}

impl Default for TransportMode {
    fn default() -> Self {
        TransportMode::Maritime
    }
}

// ─── Incoterm ────────────────────────────────────────────────────────────────

/// ICC 2020 delivery terms offered by the simulator form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Incoterm {
    Exw,
    Fca,
    Cpt,
    Cip,
    Dap,
    Dpu,
    Ddp,
    Fas,
    Fob,
    Cfr,
    Cif,
}

impl Default for Incoterm {
    fn default() -> Self {
        Incoterm::Cif
    }
}

// ─── Simulation Status ───────────────────────────────────────────────────────

/// Record lifecycle: born `Draft`, becomes `Calculated` when the landed-cost
/// pipeline runs. Editing any value or rate field reverts to `Draft` so a
/// stale result is never kept alongside changed inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStatus {
    Draft,
    Calculated,
}

impl SimulationStatus {
    pub fn is_calculated(&self) -> bool {
        matches!(self, Self::Calculated)
    }
}

// ─── Simulation ──────────────────────────────────────────────────────────────

/// One import simulation record: product metadata, value inputs, and the
/// attached result once calculated.
///
/// Identifiers are sequential (`sim-N`) and the only versioning is the
/// `revision` counter -- wall-clock timestamps are host metadata, kept out
/// of the engine so identical operations replay identically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    pub id: String,
    pub name: String,
    pub product_description: String,
    pub ncm_code: String,
    pub ncm_description: String,
    pub currency: Currency,
    pub origin_state: String,
    pub destination_state: String,
    pub transport_mode: TransportMode,
    pub incoterm: Incoterm,
    #[serde(flatten)]
    pub input: SimulationInput,
    pub status: SimulationStatus,
    #[serde(flatten)]
    pub result: Option<SimulationResult>,
    pub revision: u64,
}

impl Simulation {
    /// Fresh draft with the form's prefilled defaults.
    pub fn draft(id: String, name: String) -> Self {
        Self {
            id,
            name,
            product_description: String::new(),
            ncm_code: String::new(),
            ncm_description: String::new(),
            currency: Currency::default(),
            origin_state: "SP".to_string(),
            destination_state: "SP".to_string(),
            transport_mode: TransportMode::default(),
            incoterm: Incoterm::default(),
            input: SimulationInput::default(),
            status: SimulationStatus::Draft,
            result: None,
            revision: 0,
        }
    }
}

// ─── SimulationPatch ─────────────────────────────────────────────────────────

/// Partial update coming from the simulator form. Numeric fields arrive as
/// JS numbers (f64) and cross the strict adapter boundary before touching
/// the record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationPatch {
    pub name: Option<String>,
    pub product_description: Option<String>,
    pub ncm_code: Option<String>,
    pub ncm_description: Option<String>,
    pub currency: Option<Currency>,
    pub origin_state: Option<String>,
    pub destination_state: Option<String>,
    pub transport_mode: Option<TransportMode>,
    pub incoterm: Option<Incoterm>,

    pub fob_value: Option<f64>,
    pub freight_value: Option<f64>,
    pub insurance_value: Option<f64>,
    pub exchange_rate: Option<f64>,
    pub afrmm_value: Option<f64>,
    pub thc_value: Option<f64>,
    pub storage_value: Option<f64>,
    pub handling_value: Option<f64>,
    pub ii_rate: Option<f64>,
    pub ipi_rate: Option<f64>,
    pub pis_rate: Option<f64>,
    pub cofins_rate: Option<f64>,
    pub icms_rate: Option<f64>,
}

impl SimulationPatch {
    /// Whether the patch changes any calculator input, which invalidates a
    /// previously attached result.
    pub fn touches_values(&self) -> bool {
        self.fob_value.is_some()
            || self.freight_value.is_some()
            || self.insurance_value.is_some()
            || self.exchange_rate.is_some()
            || self.afrmm_value.is_some()
            || self.thc_value.is_some()
            || self.storage_value.is_some()
            || self.handling_value.is_some()
            || self.ii_rate.is_some()
            || self.ipi_rate.is_some()
            || self.pis_rate.is_some()
            || self.cofins_rate.is_some()
            || self.icms_rate.is_some()
    }
}

// ─── StoreStats ──────────────────────────────────────────────────────────────

/// Aggregates backing the dashboard KPI row and the reports page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total: usize,
    pub calculated: usize,
    pub drafts: usize,
    /// Mean profitability over calculated records with a defined margin;
    /// zero when none qualify.
    pub average_profitability: Percent,
    /// Summed landed cost over calculated records.
    pub total_value: Brl,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
