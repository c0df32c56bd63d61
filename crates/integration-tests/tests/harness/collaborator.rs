//! Mock remote collaborator and clients configured against it

use std::net::TcpListener;

use faultline_client::ServiceClient;
use faultline_config::Config;
use wiremock::MockServer;

/// Namespace every test client is declared under
pub const NAMESPACE: &str = "customers-ms";

/// A mock collaborator plus a client configured for it
pub struct Collaborator {
    pub server: MockServer,
    pub client: ServiceClient,
}

impl Collaborator {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with("30s").await
    }

    /// Start with a custom request timeout, e.g. `"100ms"`
    pub async fn start_with(timeout: &str) -> anyhow::Result<Self> {
        let server = MockServer::start().await;
        let client = client_for(&server.uri(), timeout)?;
        Ok(Self { server, client })
    }
}

/// Build a client through the TOML config path, as a service would
pub fn client_for(base_url: &str, timeout: &str) -> anyhow::Result<ServiceClient> {
    let toml = format!(
        r#"
[clients.{NAMESPACE}]
base_url = "{base_url}"
connect_timeout = "1s"
timeout = "{timeout}"
"#
    );

    let config = Config::from_toml(&toml)?;
    config.validate()?;

    let client_config = config
        .clients
        .get(NAMESPACE)
        .ok_or_else(|| anyhow::anyhow!("client {NAMESPACE} missing"))?;

    Ok(ServiceClient::new(NAMESPACE, client_config)?)
}

/// Base URL of a local port nothing listens on
pub fn refused_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}
