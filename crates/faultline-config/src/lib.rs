#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Configuration for faultline service clients

pub mod client;
mod env;
mod loader;
pub mod telemetry;

use indexmap::IndexMap;
use serde::Deserialize;

pub use client::ClientConfig;
pub use env::ExpandError;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level faultline configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Outbound clients keyed by namespace
    #[serde(default)]
    pub clients: IndexMap<String, ClientConfig>,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
