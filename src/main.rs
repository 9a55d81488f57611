//! CLI entry point for the factory monitor tool.
//!
//! Loads per-sensor readings from a CSV file, scores every machine, and
//! reports health and alerts to the console.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use factory_monitor::loader::load_readings;
use factory_monitor::monitor::factory::FactoryMonitor;
use factory_monitor::output::{HealthRecord, append_record, print_json, print_report};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "factory_monitor")]
#[command(about = "A tool to score industrial machine health from sensor readings", long_about = None)]
struct Cli {
    /// Path to the sensor readings CSV file
    #[arg(value_name = "READINGS_CSV")]
    input: PathBuf,

    /// Print results as pretty-printed JSON instead of the plain report
    #[arg(long, default_value_t = false)]
    json: bool,

    /// CSV file to append scored results to
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/factory_monitor.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("factory_monitor.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    // Usage and parse failures exit with status 1, not clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    let machines = load_readings(&cli.input)?;
    info!(machine_count = machines.len(), "Readings loaded");

    let mut monitor = FactoryMonitor::new();
    for (_, machine) in machines {
        monitor.add_machine(machine);
    }

    let results = monitor.check_machines();

    if cli.json {
        print_json(&results)?;
    } else {
        print_report(&results);
    }

    if let Some(output) = &cli.output {
        let now = Utc::now();
        for (machine_id, result) in &results {
            append_record(output, &HealthRecord::new(now, machine_id, result))?;
        }
        info!(path = %output.display(), records = results.len(), "Results exported");
    }

    Ok(())
}
