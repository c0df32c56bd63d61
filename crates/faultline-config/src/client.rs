use std::collections::BTreeMap;
use std::time::Duration;

use faultline_core::{AssertionConcern, Error, Fault, ValidationHandler, Validator};
use serde::Deserialize;
use url::Url;

/// Outbound client for one remote collaborator
///
/// The key the client is declared under is its namespace, the name that
/// shows up in every fault message about calls to it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL request paths are resolved against
    pub base_url: Url,
    /// Time allowed to establish a connection (e.g. `"2s"`)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: String,
    /// Time allowed for the whole request (e.g. `"30s"`)
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_connect_timeout() -> String {
    "2s".to_owned()
}

fn default_timeout() -> String {
    "30s".to_owned()
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: default_connect_timeout(),
            timeout: default_timeout(),
            headers: BTreeMap::new(),
        }
    }

    pub fn parsed_connect_timeout(&self) -> Result<Duration, Fault> {
        parse_duration("connect_timeout", &self.connect_timeout)
    }

    pub fn parsed_timeout(&self) -> Result<Duration, Fault> {
        parse_duration("timeout", &self.timeout)
    }
}

fn parse_duration(property: &str, raw: &str) -> Result<Duration, Fault> {
    duration_str::parse(raw).map_err(|_| Fault::validation_error(Error::new(property, invalid_duration(raw))))
}

/// Parser diagnostics span several lines, so only the raw value is echoed
fn invalid_duration(raw: &str) -> String {
    format!("invalid duration '{raw}'")
}

/// Checks one `[clients.<namespace>]` table, reporting every problem
pub(crate) struct ClientValidator<'a, H> {
    namespace: &'a str,
    config: &'a ClientConfig,
    handler: &'a mut H,
}

impl<'a, H> ClientValidator<'a, H> {
    pub(crate) const fn new(namespace: &'a str, config: &'a ClientConfig, handler: &'a mut H) -> Self {
        Self {
            namespace,
            config,
            handler,
        }
    }

    fn property(&self, field: &str) -> String {
        format!("clients.{}.{field}", self.namespace)
    }
}

impl<H> AssertionConcern for ClientValidator<'_, H> {}

impl<H: ValidationHandler> Validator for ClientValidator<'_, H> {
    type Handler = H;

    fn handler(&mut self) -> &mut H {
        &mut *self.handler
    }

    fn validate(&mut self) {
        let namespace = self.namespace;
        let config = self.config;
        self.handler
            .validate(|| Self::assert_argument_not_blank(namespace, "clients", "namespace must not be blank"));

        let base_url = self.property("base_url");
        let scheme = config.base_url.scheme();
        self.handler.validate(|| {
            Self::assert_condition_true(matches!(scheme, "http" | "https"), &base_url, "must use http or https")
        });

        for (field, raw) in [
            ("connect_timeout", &config.connect_timeout),
            ("timeout", &config.timeout),
        ] {
            let property = self.property(field);
            match duration_str::parse(raw) {
                Ok(duration) if duration.is_zero() => {
                    self.report(Error::new(property, "must be greater than zero"));
                }
                Ok(_) => {}
                Err(_) => self.report(Error::new(property, invalid_duration(raw))),
            }
        }
    }
}
