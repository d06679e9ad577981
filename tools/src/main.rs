//! fraudsim-runner: headless driver for the synthetic fraud simulator.
//!
//! Usage:
//!   fraudsim-runner --seed 42 --hours 2 --tph 200 --fraud-rate 0.15
//!   fraudsim-runner --patterns rapid_fire,device_spoofing --json

use anyhow::{bail, Result};
use fraudsim_core::{SimSession, SimulationConfig};
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let hours = parse_arg(&args, "--hours", 1u32);
    let tph = parse_arg(&args, "--tph", 100u32);
    let fraud_rate = parse_arg(&args, "--fraud-rate", 0.15f64);
    let json_output = args.iter().any(|a| a == "--json");
    let patterns_csv = args
        .windows(2)
        .find(|w| w[0] == "--patterns")
        .map(|w| w[1].as_str())
        .unwrap_or("mixed_patterns");

    let names: Vec<&str> = patterns_csv.split(',').filter(|s| !s.is_empty()).collect();
    let fraud_patterns = SimulationConfig::parse_patterns(&names)?;

    let config = SimulationConfig {
        duration_hours: hours,
        transactions_per_hour: tph,
        fraud_patterns,
        fraud_rate,
        seed,
    };

    if !json_output {
        println!("fraudsim-runner");
        println!("  seed:        {seed}");
        println!("  hours:       {hours}");
        println!("  tph:         {tph}");
        println!("  fraud rate:  {fraud_rate}");
        println!("  patterns:    {patterns_csv}");
        println!();
    }

    let session = SimSession::new(seed);

    // Log each 10% milestone as it passes.
    let last_decile = AtomicU64::new(0);
    let on_progress = |pct: f64| {
        let decile = (pct / 10.0) as u64;
        if decile > last_decile.swap(decile, Ordering::Relaxed) {
            log::info!("progress: {pct:.0}%");
        }
    };
    session.run_blocking(&config, Some(&on_progress))?;

    let report = match session.report() {
        Ok(r) => r,
        Err(e) => bail!("report failed: {e}"),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let s = &report.summary;
    println!("=== RUN SUMMARY ===");
    println!("  total txns:      {}", s.total_transactions);
    println!("  fraudulent:      {}", s.fraudulent_transactions);
    println!("  normal:          {}", s.normal_transactions);
    println!("  fraud rate:      {:.1}%", s.fraud_rate * 100.0);
    println!("  total amount:    ${:.2}", s.total_amount);
    println!("  fraud amount:    ${:.2} ({:.1}%)", s.fraud_amount, s.fraud_amount_percentage);
    println!("  avg risk score:  {:.3}", s.average_risk_score);
    println!(
        "  touched:         {} users, {} merchants, {} devices, {} cities",
        s.unique_users, s.unique_merchants, s.unique_devices, s.unique_locations
    );

    println!();
    println!("=== PATTERN BREAKDOWN ===");
    if report.pattern_analysis.is_empty() {
        println!("  (no fraud patterns observed)");
    }
    for (pattern, stats) in &report.pattern_analysis {
        println!(
            "  {pattern:<20} {:>6} txns  ${:.2}",
            stats.count, stats.amount
        );
    }

    println!();
    println!("=== TOP LOCATIONS ===");
    let mut locations: Vec<_> = report.location_analysis.iter().collect();
    locations.sort_by(|a, b| b.1.total_transactions.cmp(&a.1.total_transactions));
    for (city, stats) in locations.iter().take(10) {
        println!(
            "  {city:<16} {:>6} txns  fraud {:.1}%  ${:.2}",
            stats.total_transactions,
            stats.fraud_rate * 100.0,
            stats.total_amount
        );
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
