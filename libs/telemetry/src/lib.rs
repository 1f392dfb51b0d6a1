//! Logging bootstrap for tnotify binaries.
//!
//! Output goes to stderr so that payloads printed on stdout stay pipeable.

use anyhow::Result;

mod config;
mod tracing_init;

pub use config::TelemetryConfig;
pub use tracing_init::{init_tracing, tracing_initialised};

/// Default directives for binaries: HTTP client internals only at warn.
pub const DEFAULT_BINARY_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn";

/// Installs the shared subscriber configured from `RUST_LOG` and `LOG_FORMAT`.
pub fn install(service_name: &str) -> Result<()> {
    let cfg = TelemetryConfig::from_env(service_name).with_default_filter(DEFAULT_BINARY_FILTER);
    init_tracing(&cfg)
}
