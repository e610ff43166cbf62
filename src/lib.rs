// Copyright 2026 SmartImport. All rights reserved.
// SmartImport Simulation Engine

pub mod adapter;
pub mod calculator;
pub mod money;
pub mod store;
pub mod types;

pub use calculator::{
    calculate, CalculationError, SimulationInput, SimulationResult, TaxBreakdown, TaxRates,
    DEFAULT_MARKUP,
};
pub use money::{Brl, ExchangeRate, ForeignMoney, Percent};
pub use store::{SimulationStore, StoreError, DEFAULT_SIMULATION_NAME};
pub use types::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl SimulationStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self {
            simulations: Vec::new(),
            current_id: None,
            id_counter: 0,
        }
    }

    /// Seed an empty store with the first-run draft.
    pub fn initialize_store(&mut self) {
        self.initialize();
    }

    pub fn create_simulation(&mut self, patch: JsValue) -> Result<JsValue, JsError> {
        let patch: SimulationPatch =
            serde_wasm_bindgen::from_value(patch).map_err(|e| JsError::new(&e.to_string()))?;
        let sim = self.create(&patch).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&sim).unwrap_or(JsValue::NULL))
    }

    pub fn update_current_simulation(&mut self, patch: JsValue) -> Result<JsValue, JsError> {
        let patch: SimulationPatch =
            serde_wasm_bindgen::from_value(patch).map_err(|e| JsError::new(&e.to_string()))?;
        let sim = self
            .update_current(&patch)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&sim).unwrap_or(JsValue::NULL))
    }

    pub fn select_simulation(&mut self, id: &str) -> Result<(), JsError> {
        self.select(id).map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn delete_simulation(&mut self, id: &str) -> Result<(), JsError> {
        self.delete(id).map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn duplicate_simulation(&mut self, id: &str) -> Result<JsValue, JsError> {
        let sim = self.duplicate(id).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&sim).unwrap_or(JsValue::NULL))
    }

    /// Run the landed-cost pipeline on the current record. Failures surface
    /// as exceptions; there is no fallback result.
    pub fn calculate_simulation(&mut self) -> Result<JsValue, JsError> {
        let sim = self.calculate().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&sim).unwrap_or(JsValue::NULL))
    }

    pub fn get_simulations(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.simulations).unwrap_or(JsValue::NULL)
    }

    pub fn get_current_simulation(&self) -> JsValue {
        match self.current() {
            Some(sim) => serde_wasm_bindgen::to_value(sim).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    pub fn search_simulations(&self, query: &str) -> JsValue {
        serde_wasm_bindgen::to_value(&self.search(query)).unwrap_or(JsValue::NULL)
    }

    pub fn filter_simulations_by_status(&self, status: &str) -> Result<JsValue, JsError> {
        let status = match status {
            "draft" => SimulationStatus::Draft,
            "calculated" => SimulationStatus::Calculated,
            other => return Err(JsError::new(&format!("unknown status: {other}"))),
        };
        Ok(serde_wasm_bindgen::to_value(&self.filter_by_status(status)).unwrap_or(JsValue::NULL))
    }

    pub fn get_statistics(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.statistics()).unwrap_or(JsValue::NULL)
    }

    /// Reset to the first-run state (one default draft).
    pub fn clear_history(&mut self) {
        self.clear();
    }

    /// Restore host-persisted records, replacing the store contents.
    pub fn load_simulations(&mut self, records: JsValue) -> Result<(), JsError> {
        let records: Vec<Simulation> =
            serde_wasm_bindgen::from_value(records).map_err(|e| JsError::new(&e.to_string()))?;
        self.load(records);
        Ok(())
    }
}

impl Default for SimulationStore {
    fn default() -> Self {
        Self::new()
    }
}
