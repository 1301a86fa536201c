//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the filter from `RUST_LOG` or the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Default directive when neither `RUST_LOG` nor a config level is usable.
const FALLBACK_DIRECTIVE: &str = "decor_atlas=info,tower_http=info";

/// Filter derived from the configured level, e.g. `debug` becomes
/// `decor_atlas=debug,tower_http=debug`.
pub fn filter_for(config: &ObservabilityConfig) -> EnvFilter {
    let level = config.log_level.trim();
    let directive = if level.contains('=') {
        level.to_string()
    } else {
        format!("decor_atlas={level},atlas_cli={level},tower_http={level}")
    };
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_for(config));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(config.log_targets))
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
