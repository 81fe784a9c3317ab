//! Tracing setup shared by the server and the export CLI. Filter with `RUST_LOG`, switch to JSON
//! lines with `LOG_JSON`, and time spans (fetches, resampling) with `LOG_PERF`.

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::env::ENV_CONFIG;

/// Installs the global subscriber. Call once, first thing in `main`.
pub fn init() {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());

    let builder = if ENV_CONFIG.log_perf {
        builder.with_span_events(FmtSpan::CLOSE)
    } else {
        builder
    };

    if ENV_CONFIG.log_json {
        builder.json().init();
    } else {
        builder.init();
    };
}
