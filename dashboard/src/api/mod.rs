//! REST client for the hatchery backend
//!
//! Every resource lives under `{base_url}/api/`. Responses are decoded from
//! the body text so that transport failures, non-success statuses, and
//! malformed JSON surface as distinct [`DashboardError`] variants.

mod birth_rates;
mod egg_storage;
mod flocks;
mod genetics;
mod incubations;
mod planning;
mod production_curves;
mod settings;
mod trading;

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{DashboardError, DashboardResult};

/// Backend API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> DashboardResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Create a client with a custom base URL and no token (for testing)
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, path);
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> DashboardResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DashboardError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> DashboardResult<T> {
        let body = self.execute(self.request(Method::GET, path)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a JSON body and decode the JSON response
    async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> DashboardResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.execute(self.request(method, path).json(body)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a JSON body, ignoring the acknowledgement the backend returns
    async fn send_ack<B>(&self, method: Method, path: &str, body: &B) -> DashboardResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.request(method, path).json(body)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> DashboardResult<()> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

/// `{"data": ...}` envelope used by several endpoints
#[derive(serde::Deserialize)]
struct DataEnvelope<T> {
    data: T,
}
