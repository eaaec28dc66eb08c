// Parcel Sort Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/parcel-sort-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/parcel-sort-simulator --config config.txt --max-ticks 500 --seed 42 --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use parcel_sort_simulator::simulation::{LoggingConfig, SimulationEngine, SimulationReport};
use parcel_sort_simulator::types::{CliArgs, SimulationConfig};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // The guard flushes file diagnostics on drop, so it lives until main returns
    let _log_guard = match LoggingConfig::for_cli(args.verbose, args.debug).init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Parcel Sort Simulator");

    // Dry run validates strictly and reports what is wrong instead of falling back
    if args.dry_run {
        match SimulationConfig::from_cli_args(args.clone()) {
            Ok(config) => {
                eprintln!("Configuration validation successful!");
                eprintln!("Dry run mode - simulation will not be executed.");
                print_configuration_summary(&config);
                return;
            }
            Err(e) => {
                error!("Configuration is invalid: {}", e);
                eprintln!("Configuration is invalid: {}", e);
                process::exit(1);
            }
        }
    }

    let config = SimulationConfig::load_or_default(&args);
    print_startup_banner(&config);

    if let Err(e) = run(config) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Simulation failed: {:#}", e);
        process::exit(1);
    }

    info!("Parcel Sort Simulator completed successfully");
}

/// Run the simulation, writing the tick log and report where configured
///
/// Output problems never stop the run: an unusable tick log falls back to standard
/// output, and a report that cannot be written is reported after the summary.
fn run(config: SimulationConfig) -> Result<()> {
    let report_file = config.report_file.clone();

    let mut engine =
        SimulationEngine::new(config).context("Failed to initialize simulation engine")?;
    let report = engine.run_with_tick_log();

    print_final_summary(&report);

    if let Some(path) = &report_file {
        report.write_to(path).context("Failed to write simulation report")?;
        eprintln!("Report written to: {}", path);
    }

    Ok(())
}

/// Print startup banner with configuration
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Parcel Sort Simulator");
    eprintln!("=====================");
    eprintln!("A tick-driven parcel sorting network simulation");
    eprintln!();
    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Max Ticks: {}", config.max_ticks);
    eprintln!("  Queue Capacity: {}", config.queue_capacity);
    eprintln!("  Terminal Rotation Interval: {}", config.terminal_rotation_interval);
    eprintln!(
        "  Parcels Per Tick: {}-{}",
        config.parcel_per_tick_min, config.parcel_per_tick_max
    );
    eprintln!("  Misrouting Rate: {:.1}%", config.misrouting_rate * 100.0);
    eprintln!("  Cities: {}", config.city_list.join(", "));
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!("  Tick Log: {}", config.log_file.as_deref().unwrap_or("disabled"));
    eprintln!("  Tick Log Format: {}", config.log_format);
    eprintln!("  Report: {}", config.report_file.as_deref().unwrap_or("disabled"));
    eprintln!();
}

/// Print the end-of-run summary
fn print_final_summary(report: &SimulationReport) {
    let counters = &report.counters;

    eprintln!();
    eprintln!("Simulation Complete!");
    eprintln!("====================");
    eprintln!("  Ticks Executed: {}", report.ticks_executed);
    eprintln!("  Parcels Generated: {}", counters.generated);
    eprintln!("  Dispatched: {}", counters.dispatched);
    eprintln!(
        "  Returned: {} ({:.1}% of dispatch attempts)",
        counters.returned,
        counters.misroute_percentage()
    );
    eprintln!("  Discarded: {} ({:.1}%)", counters.discarded, counters.discard_percentage());
    eprintln!("  Still In Network: {}", report.in_flight());
    eprintln!("  Average Processing Time: {:.2} ticks", report.delays.average_delay);
    if let Some(longest) = report.delays.longest_delay {
        eprintln!("  Longest Delay: {}", longest);
    }
}
