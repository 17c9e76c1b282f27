//! Rate-limited HTTP client with retries, shared by the live providers.

use cgraph_common::{CGraphError, Provider, Result};
use cgraph_config::{GitHubConfig, GitLabConfig};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, error, instrument, warn};
use url::Url;

const USER_AGENT: &str = concat!("contrib-graph/", env!("CARGO_PKG_VERSION"));

/// Connection settings of one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum retry attempts
    pub max_retries: usize,
    /// Requests per second
    pub rate_limit_per_sec: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_retries: 3,
            rate_limit_per_sec: 5,
        }
    }
}

impl From<&GitHubConfig> for HttpSettings {
    fn from(config: &GitHubConfig) -> Self {
        Self {
            timeout_secs: config.timeout_seconds,
            max_retries: config.max_retries,
            rate_limit_per_sec: config.rate_limit_per_sec,
        }
    }
}

impl From<&GitLabConfig> for HttpSettings {
    fn from(config: &GitLabConfig) -> Self {
        Self {
            timeout_secs: config.timeout_seconds,
            max_retries: config.max_retries,
            rate_limit_per_sec: config.rate_limit_per_sec,
        }
    }
}

/// HTTP client bound to one provider.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    provider: Provider,
    max_retries: usize,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl HttpClient {
    /// Creates a client for `provider`.
    pub fn new(provider: Provider, settings: &HttpSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CGraphError::network_with_source("Failed to create HTTP client", e))?;

        let quota = Quota::per_second(
            NonZeroU32::new(settings.rate_limit_per_sec)
                .ok_or_else(|| CGraphError::config("Rate limit must be greater than 0"))?,
        );

        Ok(Self {
            client,
            provider,
            max_retries: settings.max_retries,
            rate_limiter: Arc::new(DefaultDirectRateLimiter::direct(quota)),
        })
    }

    /// Provider the client talks to.
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    /// Sends the request built by `build`, retrying transient failures.
    ///
    /// `build` is called once per attempt. Non-success statuses become
    /// provider errors; only 5xx answers and network failures are retried.
    #[instrument(skip(self, build), fields(provider = %self.provider))]
    pub async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync,
    {
        let build = &build;
        let strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(10))
            .take(self.max_retries);

        RetryIf::spawn(
            strategy,
            || async move {
                self.rate_limiter.until_ready().await;
                match build(&self.client).send().await {
                    Ok(response) if response.status().is_success() => {
                        debug!("Request successful: {}", response.status());
                        Ok(response)
                    }
                    Ok(response) => {
                        let status = response.status();
                        if status.is_server_error() {
                            warn!("Server error, will retry: {}", status);
                        } else {
                            error!("Client error: {}", status);
                        }
                        Err(CGraphError::provider_with_status(
                            self.provider,
                            format!("API returned {}", status),
                            status.as_u16(),
                        ))
                    }
                    Err(e) => {
                        let err = CGraphError::from(e);
                        if err.is_retryable() {
                            warn!("Request failed, will retry: {}", err);
                        }
                        Err(err)
                    }
                }
            },
            CGraphError::is_retryable,
        )
        .await
    }

    /// GET `url` and decode a JSON body.
    pub async fn get_json<T>(&self, url: &Url, bearer: Option<&str>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .send(|client| with_bearer(client.get(url.clone()), bearer))
            .await?;
        self.parse_response(response).await
    }

    /// POST a JSON body to `url` and decode a JSON answer.
    pub async fn post_json<B, T>(&self, url: &Url, body: &B, bearer: Option<&str>) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .send(|client| with_bearer(client.post(url.clone()).json(body), bearer))
            .await?;
        self.parse_response(response).await
    }

    /// HEAD `url` with `query` and return the response headers.
    pub async fn head(
        &self,
        url: &Url,
        query: &[(&str, String)],
        bearer: Option<&str>,
    ) -> Result<HeaderMap> {
        let response = self
            .send(|client| with_bearer(client.head(url.clone()).query(query), bearer))
            .await?;
        Ok(response.headers().clone())
    }

    async fn parse_response<T>(&self, response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = response
            .text()
            .await
            .map_err(|e| CGraphError::network_with_source("Failed to read response body", e))?;
        debug!(bytes = text.len(), "Received response body");
        Ok(serde_json::from_str(&text)?)
    }
}

fn with_bearer(request: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
    match bearer.filter(|token| !token.is_empty()) {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Appends path segments to `base`, percent-encoding each one.
pub fn join_segments(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| CGraphError::config_with_source(format!("Invalid base URL '{}'", base), e))?;
    url.path_segments_mut()
        .map_err(|()| CGraphError::config(format!("Base URL '{}' cannot have a path", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Reads a numeric header such as `X-Total`.
pub fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_join_segments() {
        let url = join_segments("https://gitlab.com", &["users", "tanuki", "calendar.json"]).unwrap();
        assert_eq!(url.as_str(), "https://gitlab.com/users/tanuki/calendar.json");

        let url = join_segments("https://example.com/gitlab/", &["api", "v4"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/gitlab/api/v4");
    }

    #[test]
    fn test_join_segments_encodes() {
        let url = join_segments("https://gitlab.com", &["users", "a b"]).unwrap();
        assert_eq!(url.as_str(), "https://gitlab.com/users/a%20b");
    }

    #[test]
    fn test_join_segments_rejects_bad_base() {
        assert!(join_segments("not a url", &["x"]).is_err());
        assert!(join_segments("mailto:someone@example.com", &["x"]).is_err());
    }

    #[test]
    fn test_header_u64() {
        let mut headers = HeaderMap::new();
        headers.insert("x-total", HeaderValue::from_static("42"));
        headers.insert("x-page", HeaderValue::from_static("abc"));

        assert_eq!(header_u64(&headers, "X-Total"), Some(42));
        assert_eq!(header_u64(&headers, "X-Page"), None);
        assert_eq!(header_u64(&headers, "X-Missing"), None);
    }

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new(Provider::GitHub, &HttpSettings::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_rate_limit_validation() {
        let settings = HttpSettings {
            rate_limit_per_sec: 0,
            ..HttpSettings::default()
        };
        let result = HttpClient::new(Provider::GitLab, &settings);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Rate limit must be greater than 0"));
        }
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = GitHubConfig::default();
        config.max_retries = 7;
        let settings = HttpSettings::from(&config);
        assert_eq!(settings.max_retries, 7);
        assert_eq!(settings.timeout_secs, 10);
    }
}
