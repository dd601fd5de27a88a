//! Configuration constants.
//!
//! This module defines the defaults used when a value is not supplied on the
//! command line, plus fixed operational parameters.

/// Default OpenCage forward-geocoding endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Environment variable holding the geocoding credential.
pub const API_KEY_ENV: &str = "OPENCAGE_API_KEY";

/// Environment variable overriding the geocoding endpoint.
pub const ENDPOINT_ENV: &str = "GEOCODER_ENDPOINT";

// Spreadsheet layout
/// Column holding the free-text address
pub const DEFAULT_SOURCE_COLUMN: &str = "BH";
/// Column receiving the longitude
pub const DEFAULT_LONGITUDE_COLUMN: &str = "Z";
/// Column receiving the latitude
pub const DEFAULT_LATITUDE_COLUMN: &str = "AA";
/// Suffix appended to the input file stem when no output path is given
pub const OUTPUT_SUFFIX: &str = "_updated";
/// Fractional digits used when writing coordinates back as text
pub const COORDINATE_PRECISION: usize = 6;

// Concurrency
/// Maximum lookups in flight at any time (limiter capacity)
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;
/// Number of partition workers
pub const DEFAULT_WORKERS: usize = 2;

// Network
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent sent with every geocoding request.
pub const DEFAULT_USER_AGENT: &str = concat!("sheet_geocoder/", env!("CARGO_PKG_VERSION"));

/// Progress logging interval in seconds
pub const LOGGING_INTERVAL: u64 = 5;
