//! Logging configuration.
//!
//! Logs go to stderr so that stdout stays usable as the report sink.
//! Set `DEBUG_LOGGING=1` to enable debug output for killboard crates, or
//! `RUST_LOG` for full control.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Initialize stderr logging. Call once at startup.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let filter_directive = if debug_logging {
        "info,killboard_core=debug,killboard_cli=debug"
    } else {
        "info"
    };

    // RUST_LOG wins when set
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    tracing::debug!(debug_logging, "killboard logging initialized");
}
