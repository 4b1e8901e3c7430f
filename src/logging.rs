//! Logging setup for the `octants` binary
//!
//! The library logs through the `log` facade; the binary installs
//! flexi_logger writing to stderr so stdout stays free for reports.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Start logging at `base_level` (e.g. `"info"`, `"octant_atlas=debug"`).
/// `RUST_LOG`, when set, takes precedence.
///
/// Keep the returned handle alive for the life of the process.
pub fn setup_logging(base_level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(base_level)?
        .format(flexi_logger::default_format)
        .start()
}
