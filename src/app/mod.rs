//! Main application modules.
//!
//! This module provides progress logging, shutdown handling, and statistics
//! printing used by the run orchestration.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::spawn_progress_logger;
pub use shutdown::shutdown_gracefully;
pub use statistics::print_dispatch_statistics;
