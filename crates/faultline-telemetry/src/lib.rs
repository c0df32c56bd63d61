//! Logging setup for faultline services
//!
//! Library crates only emit `tracing` events; a service calls [`init`] once
//! at startup to decide where they go.

use faultline_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::EnvFilter;

/// Pick the filter directives: configured ones win over the default
fn directives<'a>(config: Option<&'a TelemetryConfig>, default_filter: &'a str) -> &'a str {
    config
        .and_then(|c| c.filter.as_deref())
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(default_filter)
}

/// Install the global `tracing` subscriber
///
/// Unparsable filter directives fall back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_new(directives(config, default_filter)).unwrap_or_else(|_| EnvFilter::new("info"));
    let format = config.map(|c| c.format).unwrap_or_default();
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_current_span(false))
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::debug!(?format, "logging initialised");
    Ok(())
}
