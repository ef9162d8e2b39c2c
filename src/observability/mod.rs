//! Structured logging setup.
//!
//! Library code only emits `tracing` events; installing a subscriber is
//! left to the binary (or to tests that want output).

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "productpath=info";

/// Filter used when `RUST_LOG` is not set and verbose output was requested.
pub const VERBOSE_FILTER: &str = "productpath=debug";

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Defaults to `productpath=info` when `RUST_LOG` is not set. Call once at
/// program startup. Subsequent calls are silently ignored by
/// `tracing_subscriber`.
pub fn init_logging() {
    init_logging_with(DEFAULT_FILTER);
}

/// Like [`init_logging`] with an explicit fallback filter.
pub fn init_logging_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Fallback filter for the CLI's `--verbose` flag.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}
