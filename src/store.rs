// Copyright 2026 SmartImport. All rights reserved.
// SmartImport Simulation Engine - Simulation Store

//! In-memory simulation collection with the dashboard's lifecycle
//! operations: create, edit, duplicate, calculate, search, aggregate.
//!
//! The store owns records and sequencing; the landed-cost math lives in
//! [`crate::calculator`] and is called as a dependency. Persistence is the
//! host's job -- it pulls the record list out and pushes it back in through
//! [`SimulationStore::load`].

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use crate::adapter;
use crate::calculator::{self, CalculationError};
use crate::money::{Brl, Percent};
use crate::types::{Simulation, SimulationPatch, SimulationStatus, StoreStats};

pub const DEFAULT_SIMULATION_NAME: &str = "Nova Simulação";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from store operations. Calculation failures pass through as-is;
/// nothing is swallowed or substituted.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no simulation selected")]
    NoCurrentSimulation,

    #[error("simulation not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

// ---------------------------------------------------------------------------
// SimulationStore
// ---------------------------------------------------------------------------

#[wasm_bindgen]
pub struct SimulationStore {
    pub(crate) simulations: Vec<Simulation>,
    pub(crate) current_id: Option<String>,
    pub(crate) id_counter: u64,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl SimulationStore {
    /// Seed an empty store with one default draft, matching the dashboard's
    /// first-run behavior. A store that already has records is untouched.
    pub fn initialize(&mut self) {
        if self.simulations.is_empty() {
            let sim = self.next_draft(DEFAULT_SIMULATION_NAME.to_string());
            self.current_id = Some(sim.id.clone());
            self.simulations.push(sim);
        }
    }

    /// Create a new draft from a partial patch and make it current.
    /// Newest records sit at the front of the list.
    pub fn create(&mut self, patch: &SimulationPatch) -> Result<Simulation, StoreError> {
        let name = patch
            .name
            .clone()
            .unwrap_or_else(|| format!("Simulação {}", self.simulations.len() + 1));
        let mut sim = self.next_draft(name);
        apply_patch(&mut sim, patch)?;

        self.current_id = Some(sim.id.clone());
        self.simulations.insert(0, sim.clone());
        Ok(sim)
    }

    /// Merge a patch into the current record. Changing any calculator input
    /// drops the attached result and reverts the record to draft.
    pub fn update_current(&mut self, patch: &SimulationPatch) -> Result<Simulation, StoreError> {
        let id = self
            .current_id
            .clone()
            .ok_or(StoreError::NoCurrentSimulation)?;
        let sim = self
            .simulations
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;

        apply_patch(sim, patch)?;
        if patch.touches_values() {
            sim.status = SimulationStatus::Draft;
            sim.result = None;
        }
        sim.revision += 1;
        Ok(sim.clone())
    }

    pub fn select(&mut self, id: &str) -> Result<(), StoreError> {
        if !self.simulations.iter().any(|s| s.id == id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.current_id = Some(id.to_string());
        Ok(())
    }

    /// Remove a record. When the current record is deleted, selection moves
    /// to the newest remaining one.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.simulations.len();
        self.simulations.retain(|s| s.id != id);
        if self.simulations.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        if self.current_id.as_deref() == Some(id) {
            self.current_id = self.simulations.first().map(|s| s.id.clone());
        }
        Ok(())
    }

    /// Copy a record into a fresh draft (` (Cópia)` name suffix, no result)
    /// and make it current.
    pub fn duplicate(&mut self, id: &str) -> Result<Simulation, StoreError> {
        let source = self
            .simulations
            .iter()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id.to_string()))?
            .clone();

        self.id_counter += 1;
        let mut copy = source;
        copy.id = format!("sim-{}", self.id_counter);
        copy.name = format!("{} (Cópia)", copy.name);
        copy.status = SimulationStatus::Draft;
        copy.result = None;
        copy.revision = 0;

        self.current_id = Some(copy.id.clone());
        self.simulations.insert(0, copy.clone());
        Ok(copy)
    }

    /// Run the landed-cost pipeline on the current record. On success the
    /// result is attached and the record transitions `draft → calculated`;
    /// on failure the error is returned and the record is left untouched.
    pub fn calculate(&mut self) -> Result<Simulation, StoreError> {
        let id = self
            .current_id
            .clone()
            .ok_or(StoreError::NoCurrentSimulation)?;
        let sim = self
            .simulations
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let result = calculator::calculate(&sim.input)?;
        sim.result = Some(result);
        sim.status = SimulationStatus::Calculated;
        sim.revision += 1;
        Ok(sim.clone())
    }

    pub fn current(&self) -> Option<&Simulation> {
        let id = self.current_id.as_deref()?;
        self.simulations.iter().find(|s| s.id == id)
    }

    pub fn simulations(&self) -> &[Simulation] {
        &self.simulations
    }

    /// Case-insensitive match on name and product description, plus raw
    /// containment on the NCM code. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Simulation> {
        if query.is_empty() {
            return self.simulations.iter().collect();
        }
        let needle = query.to_lowercase();
        self.simulations
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.product_description.to_lowercase().contains(&needle)
                    || s.ncm_code.contains(query)
            })
            .collect()
    }

    pub fn filter_by_status(&self, status: SimulationStatus) -> Vec<&Simulation> {
        self.simulations
            .iter()
            .filter(|s| s.status == status)
            .collect()
    }

    /// Aggregates for the dashboard KPI row. Records whose profitability is
    /// "not applicable" are excluded from the average, not counted as zero.
    pub fn statistics(&self) -> StoreStats {
        let calculated: Vec<&Simulation> = self
            .simulations
            .iter()
            .filter(|s| s.status.is_calculated())
            .collect();

        let margins: Vec<Decimal> = calculated
            .iter()
            .filter_map(|s| s.result.as_ref())
            .filter_map(|r| r.profitability)
            .map(|p| p.0)
            .collect();
        let average_profitability = if margins.is_empty() {
            Percent::zero()
        } else {
            let count = Decimal::from_usize(margins.len()).unwrap_or(Decimal::ONE);
            Percent(margins.iter().copied().sum::<Decimal>() / count)
        };

        let total_value: Brl = calculated
            .iter()
            .filter_map(|s| s.result.as_ref())
            .map(|r| r.landed_cost)
            .sum();

        StoreStats {
            total: self.simulations.len(),
            calculated: calculated.len(),
            drafts: self
                .simulations
                .iter()
                .filter(|s| s.status == SimulationStatus::Draft)
                .count(),
            average_profitability,
            total_value,
        }
    }

    /// Reset to the first-run state: one default draft, counters rewound.
    pub fn clear(&mut self) {
        self.simulations.clear();
        self.current_id = None;
        self.id_counter = 0;
        self.initialize();
    }

    /// Replace the store contents with host-persisted records. The id
    /// counter resumes past the highest `sim-N` suffix so new records never
    /// collide with restored ones.
    pub fn load(&mut self, records: Vec<Simulation>) {
        self.id_counter = records
            .iter()
            .filter_map(|s| s.id.strip_prefix("sim-"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.current_id = records.first().map(|s| s.id.clone());
        self.simulations = records;
    }

    fn next_draft(&mut self, name: String) -> Simulation {
        self.id_counter += 1;
        Simulation::draft(format!("sim-{}", self.id_counter), name)
    }
}

/// Merge a patch into a record. All numeric fields cross the strict f64
/// boundary first; nothing is written unless every field converts, so a
/// failed patch leaves the record unchanged.
fn apply_patch(sim: &mut Simulation, patch: &SimulationPatch) -> Result<(), CalculationError> {
    let mut input = sim.input;
    if let Some(v) = patch.fob_value {
        input.fob_value = adapter::foreign("fobValue", v)?;
    }
    if let Some(v) = patch.freight_value {
        input.freight_value = adapter::foreign("freightValue", v)?;
    }
    if let Some(v) = patch.insurance_value {
        input.insurance_value = adapter::foreign("insuranceValue", v)?;
    }
    if let Some(v) = patch.exchange_rate {
        input.exchange_rate = adapter::exchange_rate("exchangeRate", v)?;
    }
    if let Some(v) = patch.afrmm_value {
        input.afrmm_value = adapter::brl("afrmmValue", v)?;
    }
    if let Some(v) = patch.thc_value {
        input.thc_value = adapter::brl("thcValue", v)?;
    }
    if let Some(v) = patch.storage_value {
        input.storage_value = adapter::brl("storageValue", v)?;
    }
    if let Some(v) = patch.handling_value {
        input.handling_value = adapter::brl("handlingValue", v)?;
    }
    if let Some(v) = patch.ii_rate {
        input.rates.ii_rate = adapter::percent("iiRate", v)?;
    }
    if let Some(v) = patch.ipi_rate {
        input.rates.ipi_rate = adapter::percent("ipiRate", v)?;
    }
    if let Some(v) = patch.pis_rate {
        input.rates.pis_rate = adapter::percent("pisRate", v)?;
    }
    if let Some(v) = patch.cofins_rate {
        input.rates.cofins_rate = adapter::percent("cofinsRate", v)?;
    }
    if let Some(v) = patch.icms_rate {
        input.rates.icms_rate = adapter::percent("icmsRate", v)?;
    }
    sim.input = input;

    if let Some(v) = &patch.name {
        sim.name = v.clone();
    }
    if let Some(v) = &patch.product_description {
        sim.product_description = v.clone();
    }
    if let Some(v) = &patch.ncm_code {
        sim.ncm_code = v.clone();
    }
    if let Some(v) = &patch.ncm_description {
        sim.ncm_description = v.clone();
    }
    if let Some(v) = patch.currency {
        sim.currency = v;
    }
    if let Some(v) = &patch.origin_state {
        sim.origin_state = v.clone();
    }
    if let Some(v) = &patch.destination_state {
        sim.destination_state = v.clone();
    }
    if let Some(v) = patch.transport_mode {
        sim.transport_mode = v;
    }
    if let Some(v) = patch.incoterm {
        sim.incoterm = v;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
