use reqwest::Client;
use scout_core::error::AppError;
use scout_core::query::ParameterSet;
use scout_core::traits::JobSearchClient;
use url::Url;

use crate::config::ApiConfig;

const SEARCH_PATH: &str = "/search";
const KEY_HEADER: &str = "x-rapidapi-key";
const HOST_HEADER: &str = "x-rapidapi-host";

/// JSearch API client using reqwest.
///
/// One attempt per search, no retries. Idle connections are not kept, so the
/// connection used by a request is released once it completes.
#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    config: ApiConfig,
    search_url: Url,
}

impl JSearchClient {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let search_url = Url::parse(&format!("{}{SEARCH_PATH}", config.base_url())).map_err(|e| {
            AppError::ConfigError(format!("Invalid API base URL '{}': {e}", config.base_url()))
        })?;

        let mut builder = Client::builder()
            .user_agent(concat!("scout/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(0);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::TransportError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            search_url,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Full request URL for `params`.
    pub fn request_url(&self, params: &ParameterSet) -> Url {
        let mut url = self.search_url.clone();
        url.set_query(Some(&params.to_query_string()));
        url
    }
}

impl JobSearchClient for JSearchClient {
    async fn search(&self, params: &ParameterSet) -> Result<serde_json::Value, AppError> {
        let url = self.request_url(params);
        tracing::debug!(?params, "GET {}{}", self.config.api_host(), SEARCH_PATH);

        let response = self
            .client
            .get(url)
            .header(KEY_HEADER, self.config.api_key())
            .header(HOST_HEADER, self.config.api_host())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::TransportError(format!("Request timed out: {e}"))
                } else if e.is_connect() {
                    AppError::TransportError(format!("Connection failed: {e}"))
                } else {
                    AppError::TransportError(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::TransportError(format!("Failed to read response body: {e}")))?;

        tracing::info!(status = status.as_u16(), bytes = body.len(), "Search request completed");

        if !status.is_success() {
            return Err(AppError::UpstreamError(format!(
                "HTTP {}: {}",
                status.as_u16(),
                upstream_message(&body)
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::UpstreamError(format!("Invalid JSON in search response: {e}")))
    }
}

/// Best-effort error message from an error response body.
fn upstream_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        v.get("message")
            .or_else(|| v.get("error").and_then(|e| e.get("message").or(Some(e))))
    });

    match message {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.trim().to_string(),
    }
}
