//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `sheet_geocoder` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use sheet_geocoder::config::Opt;
use sheet_geocoder::initialization::init_logger_with;
use sheet_geocoder::{run_geocode, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // OPENCAGE_API_KEY may live in a .env file, either in the current
    // directory or next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_geocode(config).await {
        Ok(report) => {
            println!(
                "✅ Geocoded {} of {} row{} ({} failed, {} not attempted) in {:.1}s",
                report.geocoded,
                report.total_rows,
                if report.total_rows == 1 { "" } else { "s" },
                report.failed,
                report.abandoned,
                report.elapsed_seconds
            );
            println!(
                "Data updated and saved successfully: {}",
                report.output_path.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("sheet_geocoder error: {:#}", e);
            process::exit(1);
        }
    }
}
