//! Tracing subscriber setup.
//!
//! Scan traffic arrives in bursts when doors open, so the filter keeps
//! sqlx statement logging at warn unless RUST_LOG overrides it; the
//! per-scan detail lives in the request spans instead.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initializes tracing from the logging configuration. `RUST_LOG` wins
/// over the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn", config.level)));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.format == "json" {
        // JSON lines for deployments behind a log collector; span close
        // events carry the per-request latency.
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_current_span(true)
                    .with_target(true),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_target(true),
            )
            .init();
    }
}
