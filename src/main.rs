// Smart Door Lock Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/smart-door-lock-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/smart-door-lock-simulator --duration-secs 120 --scan-every-secs 7 --watch --verbose
// ```

use anyhow::Context;
use clap::Parser;
use smart_door_lock_simulator::simulation::{
    DoorLockSystem, LoggingConfig, Pacing, RunSummary, SessionRunner,
};
use smart_door_lock_simulator::types::config::CliArgs;
use smart_door_lock_simulator::types::{OutputFormat, SimulationConfig};
use smart_door_lock_simulator::views::{self, WatchPrinter};
use std::io;
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let default_config = SimulationConfig::default();
        match default_config.print_json() {
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

    // Initialize logging based on CLI flags
    let mut logging = LoggingConfig::for_flags(args.verbose, args.debug);
    if let Some(dir) = &args.log_dir {
        logging = logging.with_file_logging(dir.as_str());
    }
    // Held until main returns so buffered file output is flushed
    let logging_guard = match logging.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Smart Door Lock Simulator");

    // Load configuration from CLI arguments and optional config file
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            drop(logging_guard);
            process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Configuration validation failed: {}", e);
        drop(logging_guard);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run_session(config, &args) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Simulation failed: {:#}", e);
        drop(logging_guard);
        process::exit(1);
    }

    info!("Smart Door Lock Simulator completed successfully");
}

/// Build the system, run it for the configured duration and print the result
fn run_session(config: SimulationConfig, args: &CliArgs) -> anyhow::Result<()> {
    let output_format = config
        .get_output_format()
        .map_err(anyhow::Error::msg)
        .context("Invalid output format")?;

    let mut system =
        DoorLockSystem::new(config.clone()).context("Failed to initialize door lock")?;

    if args.watch {
        let printer = WatchPrinter::new(io::stdout());
        let printer = if output_format == OutputFormat::Json { printer.lines_only() } else { printer };
        system.subscribe_observer(Box::new(printer));
    }

    let pacing = if args.real_time { Pacing::RealTime } else { Pacing::Virtual };
    let runner = SessionRunner::from_config(&config).with_pacing(pacing);
    let summary = runner.run(&mut system);

    match output_format {
        OutputFormat::Text => print_text_report(&system, &summary),
        OutputFormat::Json => {
            let json = system.report().to_json().context("Failed to serialize session report")?;
            println!("{}", json);
        }
    }

    system.shutdown();
    Ok(())
}

/// Print the final dashboard and statistics
fn print_text_report(system: &DoorLockSystem, summary: &RunSummary) {
    println!("{}", views::dashboard(&system.view()));
    println!();
    println!("{}", system.statistics());
    eprintln!(
        "Session {} finished: {} scans, {} timers fired",
        system.session_id(),
        summary.scans,
        summary.timers_fired
    );
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Smart Door Lock Simulator");
    eprintln!("=========================");
    eprintln!("ESP32 CAM + Face Recognition & Fingerprint");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Session Length: {}s", config.duration_secs);
    match config.scan_every_secs {
        Some(secs) => eprintln!("  Fingerprint Scan: every {}s", secs),
        None => eprintln!("  Fingerprint Scan: never"),
    }
    eprintln!("  Sample Interval: {} ms", config.sample_interval_ms);
    eprintln!("  Relock Delay: {} ms", config.relock_delay_ms);
    eprintln!("  Buzzer Duration: {} ms", config.alert_clear_ms);
    eprintln!("  Timer Policy: {}", config.timer_policy);
    eprintln!("  Known Names: {}", config.known_names.join(", "));
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
