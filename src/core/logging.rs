//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g.
/// `RUST_LOG=metaclock=trace` to see per-tick solar context refreshes.
///
/// # Example
/// ```
/// metaclock::core::logging::init();
/// log::info!("Meta-clock started");
/// ```
pub fn init() {
    // A host may already have installed a logger; keep theirs.
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}

/// Initialize logging for unit tests, capturing output per test.
pub fn init_for_tests() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("debug")
    )
    .is_test(true)
    .try_init();
}
