// 📜 Logging - tracing subscriber setup
//
// RUST_LOG always wins; otherwise the filter from ImportConfig is used.
// Example: RUST_LOG=employee_batch=debug

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Call once, from main.
///
/// Logs go to stderr; stdout carries the import summary.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Verbose subscriber for tests; safe to call more than once
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
