// Scenario definitions — tariff profiles typical of the import lanes the
// dashboard is used for. Rates are illustrative, not a tax table.

/// Tax rates of one tariff profile, percent scale.
pub struct RateProfile {
    pub ii: f64,
    pub ipi: f64,
    pub pis: f64,
    pub cofins: f64,
    pub icms: f64,
}

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    /// Foreign-currency-to-BRL factor for the whole batch.
    pub exchange_rate: f64,
    /// FOB value range in foreign currency.
    pub fob_range: (f64, f64),
    /// Freight as a fraction of FOB.
    pub freight_ratio: f64,
    /// Insurance as a fraction of FOB.
    pub insurance_ratio: f64,
    /// Flat BRL surcharges (AFRMM + THC + storage + handling) range.
    pub flat_logistics_range: (f64, f64),
    pub rates: RateProfile,
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "ELETRONICOS_MARITIMO",
            label: "Consumer electronics, maritime, SP",
            exchange_rate: 5.2,
            fob_range: (5_000.0, 250_000.0),
            freight_ratio: 0.08,
            insurance_ratio: 0.01,
            flat_logistics_range: (1_500.0, 9_000.0),
            rates: RateProfile {
                ii: 16.0,
                ipi: 9.75,
                pis: 2.1,
                cofins: 9.65,
                icms: 18.0,
            },
        },
        Scenario {
            name: "TEXTEIS_MARITIMO",
            label: "Textiles, maritime, high II band",
            exchange_rate: 5.2,
            fob_range: (2_000.0, 80_000.0),
            freight_ratio: 0.12,
            insurance_ratio: 0.012,
            flat_logistics_range: (1_000.0, 6_000.0),
            rates: RateProfile {
                ii: 35.0,
                ipi: 5.0,
                pis: 2.1,
                cofins: 9.65,
                icms: 17.0,
            },
        },
        Scenario {
            name: "AUTOPECAS_AEREO",
            label: "Auto parts, air freight, ICMS 12",
            exchange_rate: 5.2,
            fob_range: (500.0, 40_000.0),
            freight_ratio: 0.25,
            insurance_ratio: 0.008,
            flat_logistics_range: (300.0, 2_500.0),
            rates: RateProfile {
                ii: 18.0,
                ipi: 6.5,
                pis: 2.1,
                cofins: 9.65,
                icms: 12.0,
            },
        },
        Scenario {
            name: "INSUMOS_EX_TARIFARIO",
            label: "Zero-rated capital goods (ex-tarifário)",
            exchange_rate: 5.2,
            fob_range: (50_000.0, 1_000_000.0),
            freight_ratio: 0.05,
            insurance_ratio: 0.005,
            flat_logistics_range: (4_000.0, 20_000.0),
            rates: RateProfile {
                ii: 0.0,
                ipi: 0.0,
                pis: 0.0,
                cofins: 0.0,
                icms: 0.0,
            },
        },
        Scenario {
            name: "CARGA_ALTA_EURO",
            label: "High-value EUR operation, full tax load",
            exchange_rate: 6.1,
            fob_range: (500_000.0, 5_000_000.0),
            freight_ratio: 0.04,
            insurance_ratio: 0.004,
            flat_logistics_range: (10_000.0, 60_000.0),
            rates: RateProfile {
                ii: 14.0,
                ipi: 8.0,
                pis: 2.1,
                cofins: 9.65,
                icms: 18.0,
            },
        },
    ]
}
