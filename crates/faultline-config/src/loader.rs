use std::path::Path;

use faultline_core::{Fault, NotificationHandler, ValidationHandler, Validator};

use crate::Config;
use crate::client::ClientValidator;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, expansion or parsing
    /// fails, or validation finds any problem
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion or parsing fails, or validation finds
    /// any problem
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate every client, collecting all problems before failing
    ///
    /// # Errors
    ///
    /// Returns [`Fault::Validation`] listing every problem found
    pub fn validate(&self) -> Result<(), Fault> {
        let mut handler = NotificationHandler::new();

        for (namespace, client) in &self.clients {
            ClientValidator::new(namespace, client, &mut handler).validate();
        }

        handler.check()
    }
}
