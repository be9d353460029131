//! Logging setup
//!
//! Stampwork logs through the `log` facade. Hosts that do not install their
//! own logger can call `init_logging` once at startup.

/// Install `env_logger` with an `info` default, overridable through `RUST_LOG`.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    if result.is_ok() {
        log::debug!("[logging::init_logging] Logger installed");
    }
}

/// Logger for unit tests; output is captured by the test harness
pub fn init_test_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
