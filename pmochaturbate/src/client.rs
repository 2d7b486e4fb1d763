//! HTTP client for the Chaturbate edge HLS API
//!
//! One resolution is one `POST /get_edge_hls_url_ajax/` round trip. The
//! client keeps no state between calls: every call draws its own CSRF token
//! and builds its own request, so a single client can be cloned and shared
//! across concurrent tasks.
//!
//! # Example
//!
//! ```no_run
//! use pmochaturbate::{ChaturbateClient, ResolutionOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChaturbateClient::new().await?;
//!
//!     match client.resolve("some_model", "https://chaturbate.com/some_model/").await? {
//!         ResolutionOutcome::PlayableStream(url) => println!("Live: {}", url),
//!         ResolutionOutcome::NoStream => println!("Offline"),
//!     }
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::{EdgeHlsResponse, ResolutionOutcome};
use crate::token::{CsrfToken, CSRF_HEADER_NAME};
use reqwest::header::{CONTENT_TYPE, COOKIE, REFERER};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default Chaturbate base URL
pub const DEFAULT_BASE_URL: &str = "https://chaturbate.com";

/// Path of the edge HLS endpoint, relative to the base URL
pub const EDGE_HLS_PATH: &str = "/get_edge_hls_url_ajax/";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "PMOMusic/0.3.10 (pmochaturbate)";

/// Requested bandwidth tier
pub const DEFAULT_BANDWIDTH: &str = "high";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const X_REQUESTED_WITH: &str = "X-Requested-With";
const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Chaturbate HTTP client
#[derive(Debug, Clone)]
pub struct ChaturbateClient {
    pub(crate) client: Client,
    base_url: String,
    timeout: Duration,
}

impl ChaturbateClient {
    /// Create a new client with default settings
    pub async fn new() -> Result<Self> {
        Self::builder().build().await
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Full URL of the edge HLS endpoint
    pub fn edge_hls_endpoint(&self) -> Result<Url> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), EDGE_HLS_PATH);
        Ok(Url::parse(&url)?)
    }

    /// Form body for a channel, e.g. `room_slug=some_model&bandwidth=high`
    pub fn form_body(channel: &str) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("room_slug", channel)
            .append_pair("bandwidth", DEFAULT_BANDWIDTH)
            .finish()
    }

    // ========================================================================
    // Edge HLS API
    // ========================================================================

    /// Query the edge HLS endpoint and validate the answer.
    ///
    /// # Arguments
    ///
    /// * `channel` - Channel identifier, not yet form-encoded
    /// * `referer` - Page URL the channel was taken from
    ///
    /// # Errors
    ///
    /// - [`Error::RequestFailed`] / [`Error::UnexpectedStatus`] for transport
    ///   failures, timeouts and non-2xx answers
    /// - [`Error::InvalidResponseShape`] when the body is not the expected JSON
    pub async fn edge_hls_url(&self, channel: &str, referer: &str) -> Result<EdgeHlsResponse> {
        if channel.is_empty() {
            return Err(Error::InvalidChannel(channel.to_string()));
        }

        let endpoint = self.edge_hls_endpoint()?;
        let token = CsrfToken::generate();
        let body = Self::form_body(channel);

        debug!(endpoint = %endpoint, "Sending POST request");
        debug!(data = %body, "Request body");

        let response = self
            .client
            .post(endpoint)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(CSRF_HEADER_NAME, token.as_str())
            .header(X_REQUESTED_WITH, XML_HTTP_REQUEST)
            .header(REFERER, referer)
            .header(COOKIE, token.cookie())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus(status));
        }

        let text = response.text().await?;
        let edge: EdgeHlsResponse = serde_json::from_str(&text)?;

        debug!(
            url = ?edge.url,
            status = %edge.room_status,
            success = ?edge.success,
            "API response"
        );

        Ok(edge)
    }

    /// Run one request/decide cycle for a channel.
    ///
    /// No retry is attempted; errors are returned to the caller as-is.
    pub async fn resolve(&self, channel: &str, referer: &str) -> Result<ResolutionOutcome> {
        let edge = self.edge_hls_url(channel, referer).await?;

        info!(
            channel,
            status = %edge.room_status,
            success = edge.success.is_truthy(),
            "Stream status"
        );

        Ok(ResolutionOutcome::from_response(&edge))
    }
}

/// Builder for ChaturbateClient
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Build the client
    pub async fn build(self) -> Result<ChaturbateClient> {
        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout);

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::other(format!("Invalid proxy: {}", e)))?;
                builder = builder.proxy(proxy);
            }

            builder.build()?
        };

        Ok(ChaturbateClient {
            client,
            base_url: self.base_url,
            timeout: self.timeout,
        })
    }
}
