//! sheet_geocoder library: batch geocoding of spreadsheet address columns
//!
//! This library reads the first worksheet of a workbook, geocodes every
//! address in one column against an OpenCage-compatible HTTP service with
//! bounded concurrency, and writes longitude/latitude back into two other
//! columns of a new workbook.
//!
//! # Example
//!
//! ```no_run
//! use sheet_geocoder::{run_geocode, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: std::path::PathBuf::from("stores.xlsx"),
//!     api_key: std::env::var("OPENCAGE_API_KEY")?,
//!     max_concurrency: 10,
//!     ..Default::default()
//! };
//!
//! let report = run_geocode(config).await?;
//! println!("Geocoded {} of {} rows", report.geocoded, report.total_rows);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime; workers run as parallel tasks, so
//! the multi-threaded runtime is expected.

mod app;
pub mod config;
pub mod dispatch;
pub mod error_handling;
pub mod geocode;
pub mod initialization;
pub mod limiter;
mod run;
pub mod sheet;

// Re-export public API
pub use config::{Config, FailurePolicy, LogFormat, LogLevel};
pub use dispatch::{AddressRow, CoordinateSink, DispatchSummary, RowDispatcher, WorkerOutcome};
pub use error_handling::{GeocodeError, RunError, SheetError};
pub use geocode::{Coordinates, Geocoder, OpenCageClient};
pub use limiter::{ConcurrencyLimiter, Permit};
pub use run::{run_geocode, run_geocode_with, GeocodeReport};
pub use sheet::{column_to_index, CellValue, Sheet};
