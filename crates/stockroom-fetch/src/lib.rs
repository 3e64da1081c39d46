//! HTTP client and backend port for the Stockroom console.
//!
//! Provides a small builder API over `reqwest` with JSON handling, and the
//! [`InventoryApi`] trait the console talks to. Two implementations ship:
//! [`HttpInventoryApi`] for a real backend and [`MemoryInventoryApi`], an
//! in-process stand-in that follows the same rules.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockroom_fetch::{FetchClient, HttpInventoryApi, InventoryApi};
//! use stockroom_model::ViewMode;
//!
//! let client = FetchClient::new()?.with_base_url("http://localhost:5000");
//! let api = HttpInventoryApi::new(client);
//!
//! let active = api.list(ViewMode::Active).await?;
//! println!("{} active rows", active.len());
//! ```

mod api;
mod error;
mod memory;
mod request;
mod response;
mod timeout;

pub use api::{paths, HttpInventoryApi, InventoryApi};
pub use error::FetchError;
pub use memory::MemoryInventoryApi;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use timeout::TimeoutConfig;

use std::collections::HashMap;

/// HTTP client for backend requests.
///
/// Wraps a `reqwest` client with a base URL and a set of default headers
/// applied to every request.
#[derive(Debug, Clone)]
pub struct FetchClient {
    inner: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a new HTTP client with default timeouts.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeouts(TimeoutConfig::default())
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(timeouts: TimeoutConfig) -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.total)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            inner,
            base_url: None,
            default_headers: HashMap::new(),
        })
    }

    /// Set a base URL that will be prepended to relative request paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self.inner.clone(),
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    client: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = self.builder;

        tracing::debug!(%method, %url, "sending request");

        let mut request = self.client.request(method.into(), &url);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(%method, %url, status, bytes = body.len(), "received response");

        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        FetchClient, FetchError, HttpInventoryApi, InventoryApi, MemoryInventoryApi, Method,
        Response, TimeoutConfig,
    };
}
