//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_LATITUDE_COLUMN, DEFAULT_LONGITUDE_COLUMN,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_SOURCE_COLUMN, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    DEFAULT_WORKERS, ENDPOINT_ENV, OUTPUT_SUFFIX,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// What a worker does after one of its lookups fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicy {
    /// Stop the worker; the rest of its partition stays unwritten.
    AbortPartition,
    /// Leave the failed row unwritten and continue with the next one.
    SkipRow,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use sheet_geocoder::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("stores.xlsx"),
///     api_key: "secret".to_string(),
///     max_concurrency: 4,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Workbook to read addresses from (first worksheet only)
    pub input: PathBuf,

    /// Workbook to write; derived from `input` when `None`
    pub output: Option<PathBuf>,

    /// Column label holding the addresses
    pub source_column: String,

    /// Column label receiving longitudes
    pub longitude_column: String,

    /// Column label receiving latitudes
    pub latitude_column: String,

    /// Geocoding service credential
    pub api_key: String,

    /// Geocoding service endpoint
    pub endpoint: String,

    /// Maximum lookups in flight across all workers
    pub max_concurrency: usize,

    /// Number of partition workers
    pub workers: usize,

    /// Behavior after a failed lookup
    pub on_failure: FailurePolicy,

    /// Per-request timeout in seconds (0 is treated as 1)
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("addresses.xlsx"),
            output: None,
            source_column: DEFAULT_SOURCE_COLUMN.to_string(),
            longitude_column: DEFAULT_LONGITUDE_COLUMN.to_string(),
            latitude_column: DEFAULT_LATITUDE_COLUMN.to_string(),
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            workers: DEFAULT_WORKERS,
            on_failure: FailurePolicy::AbortPartition,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Returns the path the updated workbook is saved to.
    ///
    /// Falls back to `<input stem>_updated.xlsx` in the input's directory.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => derive_output_path(&self.input),
        }
    }
}

fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string());
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.xlsx"))
}

fn parse_positive<T>(s: &str) -> Result<T, String>
where
    T: FromStr + Default + PartialEq,
    T::Err: Display,
{
    let n: T = s.parse().map_err(|e: T::Err| e.to_string())?;
    if n == T::default() {
        return Err("value must be at least 1".to_string());
    }
    Ok(n)
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Basic usage (credential from OPENCAGE_API_KEY or .env)
/// sheet_geocoder stores.xlsx
///
/// # Different address column, more parallelism, keep going after failures
/// sheet_geocoder stores.xlsx --column C --workers 4 --on-failure skip-row
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "sheet_geocoder",
    version,
    about = "Geocodes a spreadsheet address column and writes coordinates back."
)]
pub struct Opt {
    /// Workbook to read
    #[arg(value_parser)]
    pub input: PathBuf,

    /// Workbook to write (default: <input stem>_updated.xlsx)
    #[arg(long, value_parser)]
    pub output: Option<PathBuf>,

    /// Column label holding the addresses
    #[arg(long, default_value = DEFAULT_SOURCE_COLUMN)]
    pub column: String,

    /// Column label receiving longitudes
    #[arg(long, default_value = DEFAULT_LONGITUDE_COLUMN)]
    pub longitude_column: String,

    /// Column label receiving latitudes
    #[arg(long, default_value = DEFAULT_LATITUDE_COLUMN)]
    pub latitude_column: String,

    /// Geocoding service API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: String,

    /// Geocoding service endpoint
    #[arg(long, env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Maximum lookups in flight at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY, value_parser = parse_positive::<usize>)]
    pub max_concurrency: usize,

    /// Number of partition workers
    #[arg(long, default_value_t = DEFAULT_WORKERS, value_parser = parse_positive::<usize>)]
    pub workers: usize,

    /// What a worker does after a failed lookup: abort-partition|skip-row
    #[arg(long, value_enum, default_value_t = FailurePolicy::AbortPartition)]
    pub on_failure: FailurePolicy,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = parse_positive::<u64>)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            input: opt.input,
            output: opt.output,
            source_column: opt.column,
            longitude_column: opt.longitude_column,
            latitude_column: opt.latitude_column,
            api_key: opt.api_key,
            endpoint: opt.endpoint,
            max_concurrency: opt.max_concurrency,
            workers: opt.workers,
            on_failure: opt.on_failure,
            timeout_seconds: opt.timeout_seconds,
            user_agent: opt.user_agent,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_default_config_matches_reference_layout() {
        let config = Config::default();
        assert_eq!(config.source_column, "BH");
        assert_eq!(config.longitude_column, "Z");
        assert_eq!(config.latitude_column, "AA");
        assert_eq!(config.max_concurrency, 10);
        assert_eq!(config.workers, 2);
        assert_eq!(config.on_failure, FailurePolicy::AbortPartition);
    }

    #[test]
    fn test_output_path_derived_from_input() {
        let config = Config {
            input: PathBuf::from("/data/SdxStores.xlsx"),
            ..Default::default()
        };
        assert_eq!(
            config.output_path(),
            PathBuf::from("/data/SdxStores_updated.xlsx")
        );
    }

    #[test]
    fn test_output_path_explicit() {
        let config = Config {
            input: PathBuf::from("in.xlsx"),
            output: Some(PathBuf::from("out/result.xlsx")),
            ..Default::default()
        };
        assert_eq!(config.output_path(), PathBuf::from("out/result.xlsx"));
    }

    #[test]
    fn test_opt_parses_defaults() {
        let opt = Opt::try_parse_from(["sheet_geocoder", "stores.xlsx", "--api-key", "k"])
            .expect("defaults should parse");
        let config = Config::from(opt);
        assert_eq!(config.input, PathBuf::from("stores.xlsx"));
        assert_eq!(config.api_key, "k");
        assert_eq!(config.source_column, "BH");
        assert_eq!(config.workers, 2);
        assert_eq!(config.max_concurrency, 10);
    }

    #[test]
    fn test_opt_parses_failure_policy() {
        let opt = Opt::try_parse_from([
            "sheet_geocoder",
            "stores.xlsx",
            "--api-key",
            "k",
            "--on-failure",
            "skip-row",
            "--workers",
            "4",
        ])
        .expect("flags should parse");
        assert_eq!(opt.on_failure, FailurePolicy::SkipRow);
        assert_eq!(opt.workers, 4);
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive::<usize>("3"), Ok(3));
        assert_eq!(parse_positive::<u64>("30"), Ok(30));
        assert!(parse_positive::<u64>("0").is_err());
        assert!(parse_positive::<usize>("-1").is_err());
        assert!(parse_positive::<u64>("ten").is_err());
    }

    #[test]
    fn test_opt_rejects_zero_timeout() {
        let result = Opt::try_parse_from([
            "sheet_geocoder",
            "stores.xlsx",
            "--api-key",
            "k",
            "--timeout-seconds",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_opt_rejects_zero_concurrency() {
        let result = Opt::try_parse_from([
            "sheet_geocoder",
            "stores.xlsx",
            "--api-key",
            "k",
            "--max-concurrency",
            "0",
        ]);
        assert!(result.is_err());
    }
}
