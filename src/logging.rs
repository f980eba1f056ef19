//! Logging initialization
//!
//! Diagnostics go to stderr so they never mix with wizard output on stdout.
//! The level comes from `RUST_LOG` when set, then `--debug`, then the
//! `log_level` setting.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;

/// Pick the filter directive for this run
pub fn filter_directive(settings: &Settings, debug_override: bool) -> String {
    if let Ok(directive) = std::env::var("RUST_LOG") {
        if !directive.trim().is_empty() {
            return directive;
        }
    }
    if debug_override {
        "debug".to_string()
    } else {
        settings.log_level.clone()
    }
}

/// Install the global subscriber
pub fn init_logging(settings: &Settings, debug_override: bool) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive(settings, debug_override))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
