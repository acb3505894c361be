//! Logging utilities
//!
//! Thin wrapper over `env_logger` so binaries get a consistent default filter.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// Respects `RUST_LOG` when set and defaults to `info` otherwise. Safe to call
/// once per process, from the binary's `main`.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
