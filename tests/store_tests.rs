#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use smartimport_engine::{
        calculate, Brl, CalculationError, SimulationPatch, SimulationStatus, SimulationStore,
        StoreError,
    };

    fn electronics_patch() -> SimulationPatch {
        SimulationPatch {
            name: Some("Eletrônicos Q3".into()),
            product_description: Some("Sensores de temperatura".into()),
            ncm_code: Some("8542.31.20".into()),
            fob_value: Some(1000.0),
            freight_value: Some(100.0),
            insurance_value: Some(20.0),
            exchange_rate: Some(5.0),
            ii_rate: Some(10.0),
            ipi_rate: Some(5.0),
            pis_rate: Some(1.65),
            cofins_rate: Some(7.6),
            icms_rate: Some(18.0),
            ..SimulationPatch::default()
        }
    }

    // ========== Dashboard session flows ==========

    #[test]
    fn full_session_draft_to_calculated() {
        let mut store = SimulationStore::new();
        store.initialize_store();

        store
            .update_current(&electronics_patch())
            .expect("form update");
        let sim = store.calculate().expect("calculate");

        assert_eq!(sim.status, SimulationStatus::Calculated);
        let result = sim.result.expect("result attached");
        assert_eq!(result.fob_brl, Brl(dec!(5000)));
        assert_eq!(result.landed_cost, Brl(dec!(8044.84125)));
        assert_eq!(
            result.profitability.expect("defined margin").0.round_dp(4),
            dec!(23.0769)
        );
    }

    #[test]
    fn recalculation_after_rate_change() {
        let mut store = SimulationStore::new();
        store.initialize_store();
        store
            .update_current(&electronics_patch())
            .expect("form update");
        let first = store.calculate().expect("calculate");

        // Interstate operation: ICMS drops to 12%
        store
            .update_current(&SimulationPatch {
                icms_rate: Some(12.0),
                ..SimulationPatch::default()
            })
            .expect("rate update");
        assert_eq!(store.current().unwrap().status, SimulationStatus::Draft);

        let second = store.calculate().expect("recalculate");
        let first_result = first.result.unwrap();
        let second_result = second.result.unwrap();

        // Only ICMS moved; the upstream cascade is untouched
        assert_eq!(second_result.taxes.ii_value, first_result.taxes.ii_value);
        assert_eq!(second_result.taxes.pis_value, first_result.taxes.pis_value);
        assert!(second_result.taxes.icms_value < first_result.taxes.icms_value);
        assert!(second_result.landed_cost < first_result.landed_cost);
    }

    #[test]
    fn duplicate_then_diverge() {
        let mut store = SimulationStore::new();
        store.initialize_store();
        store
            .update_current(&electronics_patch())
            .expect("form update");
        let original = store.calculate().expect("calculate");

        let copy = store.duplicate(&original.id).expect("duplicate");
        store
            .update_current(&SimulationPatch {
                fob_value: Some(2000.0),
                ..SimulationPatch::default()
            })
            .expect("edit copy");
        let copy_calculated = store.calculate().expect("recalculate copy");

        let original_result = store
            .simulations()
            .iter()
            .find(|s| s.id == original.id)
            .and_then(|s| s.result)
            .expect("original result intact");
        let copy_result = copy_calculated.result.expect("copy result");

        assert_ne!(copy.id, original.id);
        assert_eq!(original_result.fob_brl, Brl(dec!(5000)));
        assert_eq!(copy_result.fob_brl, Brl(dec!(10000)));
    }

    #[test]
    fn statistics_follow_the_session() {
        let mut store = SimulationStore::new();
        store.initialize_store();
        store
            .update_current(&electronics_patch())
            .expect("form update");
        store.calculate().expect("calculate");
        store
            .create(&SimulationPatch {
                name: Some("Rascunho têxtil".into()),
                ..SimulationPatch::default()
            })
            .expect("create draft");

        let stats = store.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.calculated, 1);
        assert_eq!(stats.drafts, 1);
        assert_eq!(stats.total_value, Brl(dec!(8044.84125)));
    }

    // ========== Error surfacing ==========

    #[test]
    fn calculation_errors_are_typed_not_swallowed() {
        let mut store = SimulationStore::new();
        store.initialize_store();
        store
            .update_current(&SimulationPatch {
                exchange_rate: Some(0.0),
                ..electronics_patch()
            })
            .expect("form update");

        let err = store.calculate();
        assert!(
            matches!(
                err,
                Err(StoreError::Calculation(
                    CalculationError::NonPositiveExchangeRate(_)
                ))
            ),
            "expected typed calculation error, got {err:?}"
        );
        // No fallback result was attached
        assert!(store.current().unwrap().result.is_none());
    }

    #[test]
    fn non_finite_form_values_are_rejected() {
        let mut store = SimulationStore::new();
        store.initialize_store();

        let err = store.update_current(&SimulationPatch {
            fob_value: Some(f64::NAN),
            ..SimulationPatch::default()
        });
        assert!(matches!(
            err,
            Err(StoreError::Calculation(CalculationError::NonFinite {
                field: "fobValue"
            }))
        ));
    }

    #[test]
    fn unknown_record_operations_fail_loudly() {
        let mut store = SimulationStore::new();
        store.initialize_store();
        assert!(matches!(
            store.select("sim-999"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.duplicate("sim-999"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("sim-999"),
            Err(StoreError::NotFound(_))
        ));
    }

    // ========== Persistence contract ==========

    #[test]
    fn records_roundtrip_through_host_persistence() {
        let mut store = SimulationStore::new();
        store.initialize_store();
        store
            .update_current(&electronics_patch())
            .expect("form update");
        store.calculate().expect("calculate");

        // The host serializes the list, stores it, and feeds it back later
        let json = serde_json::to_string(store.simulations()).expect("serialize");
        let records = serde_json::from_str(&json).expect("deserialize");

        let mut restored = SimulationStore::new();
        restored.load(records);

        assert_eq!(restored.simulations(), store.simulations());
        let sim = restored.current().expect("current restored");
        assert_eq!(sim.status, SimulationStatus::Calculated);
        assert_eq!(
            sim.result.expect("result restored").landed_cost,
            Brl(dec!(8044.84125))
        );
    }

    // ========== Calculator as a standalone library ==========

    #[test]
    fn calculator_usable_without_a_store() {
        let mut store = SimulationStore::new();
        store.initialize_store();
        store
            .update_current(&electronics_patch())
            .expect("form update");
        let input = store.current().unwrap().input;

        let direct = calculate(&input).expect("direct call");
        let via_store = store.calculate().expect("store call").result.unwrap();
        assert_eq!(direct, via_store);
    }
}
