use faultline_config::ClientConfig;
use faultline_core::{Error, Fault};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::call::Call;
use crate::classifier::FaultClassifier;
use crate::error::CallError;

/// HTTP client for one remote collaborator
///
/// Every request goes through the [`FaultClassifier`], so callers only ever
/// see values or [`Fault`]s.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: Url,
    classifier: FaultClassifier,
}

impl ServiceClient {
    /// Build a client from its `[clients.<namespace>]` table
    ///
    /// # Errors
    ///
    /// Returns a validation fault for unparseable timeouts or headers
    pub fn new(namespace: impl Into<String>, config: &ClientConfig) -> Result<Self, Fault> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.parsed_connect_timeout()?)
            .timeout(config.parsed_timeout()?)
            .default_headers(default_headers(config)?)
            .build()
            .map_err(|e| Fault::internal_with_cause("failed to build HTTP client", e))?;

        Ok(Self::from_parts(
            http,
            config.base_url.clone(),
            FaultClassifier::new(namespace),
        ))
    }

    pub const fn from_parts(http: reqwest::Client, base_url: Url, classifier: FaultClassifier) -> Self {
        Self {
            http,
            base_url,
            classifier,
        }
    }

    pub const fn classifier(&self) -> &FaultClassifier {
        &self.classifier
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch a resource; `Ok(None)` when the collaborator answers 404
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, resource_id: &str) -> Result<Option<T>, Fault> {
        let call = Call::get(resource_id);
        let outcome = self.send_json::<(), T>(&call, path, None).await;
        self.classifier.do_get(&call, outcome)
    }

    pub async fn post_json<B, T>(&self, path: &str, resource_id: Option<&str>, body: &B) -> Result<T, Fault>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let call = Call::post(resource_id);
        let outcome = self.send_json(&call, path, Some(body)).await;
        self.classifier.do_post(&call, outcome)
    }

    pub async fn put_json<B, T>(&self, path: &str, resource_id: &str, body: &B) -> Result<T, Fault>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let call = Call::put(resource_id);
        let outcome = self.send_json(&call, path, Some(body)).await;
        self.classifier.do_update(&call, outcome)
    }

    pub async fn patch_json<B, T>(&self, path: &str, resource_id: &str, body: &B) -> Result<T, Fault>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let call = Call::patch(resource_id);
        let outcome = self.send_json(&call, path, Some(body)).await;
        self.classifier.do_update(&call, outcome)
    }

    /// Delete a resource, ignoring any response body
    pub async fn delete(&self, path: &str, resource_id: &str) -> Result<(), Fault> {
        let call = Call::delete(resource_id);
        let outcome = self.dispatch::<()>(&call, path, None).await.map(drop);
        self.classifier.do_update(&call, outcome)
    }

    /// Send with the call's method and decode a JSON answer, unclassified
    ///
    /// For calls that need an action annotation; pair it with one of the
    /// classifier's `do_*` policies.
    pub async fn send_json<B, T>(&self, call: &Call<'_>, path: &str, body: Option<&B>) -> Result<T, CallError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.dispatch(call, path, body).await?;
        Ok(response.json().await?)
    }

    async fn dispatch<B>(&self, call: &Call<'_>, path: &str, body: Option<&B>) -> Result<reqwest::Response, CallError>
    where
        B: Serialize + ?Sized,
    {
        let url = make_url(&self.base_url, path);
        let mut builder = self.http.request(call.method().clone(), url.as_str());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Ok(self.classifier.check(response, call).await?)
    }
}

/// Append `path` to the base URL's own path
fn make_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    let joined = format!(
        "{}/{}",
        base_url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap, Fault> {
    let mut headers = HeaderMap::new();

    for (name, value) in &config.headers {
        let invalid = |e: &dyn std::fmt::Display| {
            Fault::validation_error(Error::new(format!("headers.{name}"), e.to_string()))
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(&e))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(&e))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}
