//! Logger of the reconciler.
//!
//! Handlers and core flows log through the re-exported macros so the backing
//! implementation stays swappable in one place:
//!
//! ```rust
//! use reconciler_env::logger;
//!
//! logger::info!("reconciled notification");
//! ```

use serde::Deserialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing::{debug, error, info, warn};

/// Telemetry output format.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console lines, for development.
    #[default]
    Console,
    /// One JSON document per event, for log shipping.
    Json,
}

/// Logging section of the application settings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, `RUST_LOG` syntax. Defaults to `info` for this
    /// workspace's crates when unset.
    pub filtering_directive: Option<String>,
    /// Output format.
    pub format: LogFormat,
}

/// Install the global tracing subscriber.
///
/// Must be called once, before any request is served. Later calls are ignored
/// so tests can set up logging independently of ordering.
pub fn setup(config: &LogConfig) {
    let filter = config
        .filtering_directive
        .clone()
        .map(EnvFilter::new)
        .unwrap_or_else(|| {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reconciler=debug"))
        });

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Console => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json().flatten_event(true)).try_init(),
    };

    if result.is_err() {
        debug!("global tracing subscriber was already installed");
    }
}
