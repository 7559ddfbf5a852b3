//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Panics if a logger is already installed; call once at host startup.
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, tolerating repeat calls
///
/// Useful from tests and tools where several entry points may race to
/// install the logger.
pub fn try_init() {
    let _ = env_logger::try_init();
}
