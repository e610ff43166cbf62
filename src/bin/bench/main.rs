// SmartImport Engine Benchmark Runner — landed-cost batches over tariff scenarios
// Seedable PRNG; identical seeds reproduce identical batches bit for bit
//
// Usage:
//   cargo run --release --bin bench                   # all scenarios, 1000 runs each
//   cargo run --release --bin bench -- --runs 100     # quick mode
//   cargo run --release --bin bench -- ELETRONICOS    # filter by name
//   cargo run --release --bin bench -- --seed 42      # custom base seed
//   cargo run --release --bin bench -- --json         # machine-readable report

mod scenarios;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Instant;

use scenarios::{scenarios, Scenario};
use smartimport_engine::{adapter, calculate, CalculationError, SimulationInput};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    json: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 1000,
        seed: 0,
        json: false,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(1000);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--json" => cli.json = true,
            other => cli.filter = Some(other.to_string()),
        }
        i += 1;
    }
    cli
}

// ─── Input generation ───────────────────────────────────────────────────────

fn random_input(scenario: &Scenario, rng: &mut ChaCha8Rng) -> Result<SimulationInput, CalculationError> {
    let fob = rng.gen_range(scenario.fob_range.0..=scenario.fob_range.1);
    let freight = fob * scenario.freight_ratio * rng.gen_range(0.8..=1.2);
    let insurance = fob * scenario.insurance_ratio * rng.gen_range(0.8..=1.2);
    let flat = rng.gen_range(scenario.flat_logistics_range.0..=scenario.flat_logistics_range.1);

    Ok(SimulationInput {
        fob_value: adapter::foreign("fobValue", fob)?,
        freight_value: adapter::foreign("freightValue", freight)?,
        insurance_value: adapter::foreign("insuranceValue", insurance)?,
        exchange_rate: adapter::exchange_rate("exchangeRate", scenario.exchange_rate)?,
        afrmm_value: adapter::brl("afrmmValue", flat * 0.25)?,
        thc_value: adapter::brl("thcValue", flat * 0.35)?,
        storage_value: adapter::brl("storageValue", flat * 0.25)?,
        handling_value: adapter::brl("handlingValue", flat * 0.15)?,
        rates: smartimport_engine::TaxRates {
            ii_rate: adapter::percent("iiRate", scenario.rates.ii)?,
            ipi_rate: adapter::percent("ipiRate", scenario.rates.ipi)?,
            pis_rate: adapter::percent("pisRate", scenario.rates.pis)?,
            cofins_rate: adapter::percent("cofinsRate", scenario.rates.cofins)?,
            icms_rate: adapter::percent("icmsRate", scenario.rates.icms)?,
        },
    })
}

// ─── Report ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ScenarioReport {
    scenario: &'static str,
    runs: usize,
    mean_landed_cost_brl: f64,
    min_landed_cost_brl: f64,
    max_landed_cost_brl: f64,
    mean_tax_burden_pct: f64,
    deterministic: bool,
    elapsed_ms: u128,
}

fn run_scenario(
    scenario: &Scenario,
    runs: usize,
    seed: u64,
) -> Result<ScenarioReport, CalculationError> {
    let started = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut sum_landed = 0.0;
    let mut sum_burden = 0.0;
    let mut min_landed = f64::MAX;
    let mut max_landed = f64::MIN;
    let mut first_input = None;
    let mut first_result = None;

    for run in 0..runs {
        let input = random_input(scenario, &mut rng)?;
        let result = calculate(&input)?;

        let landed = adapter::from_decimal(result.landed_cost.0);
        sum_landed += landed;
        if landed > 0.0 {
            sum_burden += adapter::from_decimal(result.total_taxes.0) / landed * 100.0;
        }
        min_landed = min_landed.min(landed);
        max_landed = max_landed.max(landed);

        if run == 0 {
            first_input = Some(input);
            first_result = Some(result);
        }
    }

    // Same input must reproduce the exact same result
    let deterministic = match (first_input, first_result) {
        (Some(input), Some(result)) => calculate(&input)? == result,
        _ => true,
    };

    Ok(ScenarioReport {
        scenario: scenario.name,
        runs,
        mean_landed_cost_brl: sum_landed / runs as f64,
        min_landed_cost_brl: min_landed,
        max_landed_cost_brl: max_landed,
        mean_tax_burden_pct: sum_burden / runs as f64,
        deterministic,
        elapsed_ms: started.elapsed().as_millis(),
    })
}

fn main() {
    let cli = parse_args();
    let all = scenarios();
    let selected: Vec<&Scenario> = all
        .iter()
        .filter(|s| {
            cli.filter
                .as_deref()
                .map(|f| s.name.contains(f))
                .unwrap_or(true)
        })
        .collect();

    if selected.is_empty() {
        eprintln!("No scenario matches the filter");
        std::process::exit(1);
    }

    let mut reports = Vec::new();
    for (idx, scenario) in selected.iter().enumerate() {
        let seed = cli.seed.wrapping_add(idx as u64);
        match run_scenario(scenario, cli.runs, seed) {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("{}: {e}", scenario.name);
                std::process::exit(1);
            }
        }
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).expect("report serialization")
        );
        return;
    }

    println!(
        "{:<24} {:>6} {:>18} {:>18} {:>14} {:>6}",
        "scenario", "runs", "mean landed (R$)", "max landed (R$)", "tax burden", "det"
    );
    for r in &reports {
        println!(
            "{:<24} {:>6} {:>18.2} {:>18.2} {:>13.2}% {:>6}",
            r.scenario,
            r.runs,
            r.mean_landed_cost_brl,
            r.max_landed_cost_brl,
            r.mean_tax_burden_pct,
            if r.deterministic { "ok" } else { "FAIL" }
        );
    }

    if reports.iter().any(|r| !r.deterministic) {
        eprintln!("determinism check failed");
        std::process::exit(1);
    }
}
