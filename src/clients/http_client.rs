//! HTTP transport for RingPlus API communication.
//!
//! The binder talks to the network only through the [`HttpTransport`] trait.
//! [`ReqwestTransport`] is the production implementation; tests substitute
//! scripted transports to simulate network failures.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, PreparedRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::RingPlusConfig;
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A boxed, `Send` future returned by [`HttpTransport::send`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Executes prepared requests.
///
/// Implementations must return `Ok` for every response that arrived,
/// whatever its status code, and `Err` only when no response was received.
pub trait HttpTransport: Send + Sync {
    /// Sends a request and returns the raw response.
    fn send<'a>(&'a self, request: PreparedRequest)
        -> BoxFuture<'a, Result<HttpResponse, TransportError>>;
}

/// [`HttpTransport`] backed by `reqwest`.
///
/// Configured from [`RingPlusConfig`]: timeout, optional proxy and the
/// `User-Agent` header are fixed at construction.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    user_agent: String,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxy`] if the proxy URL is rejected, or
    /// [`ConfigError::HttpClient`] if the TLS backend fails to initialize.
    pub fn new(config: &RingPlusConfig) -> Result<Self, ConfigError> {
        let user_agent = Self::user_agent_for(config.user_agent_prefix());

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .user_agent(user_agent.clone());

        if let Some(proxy) = config.proxy() {
            let proxy = reqwest::Proxy::all(proxy).map_err(|e| ConfigError::InvalidProxy {
                url: proxy.to_string(),
                reason: e.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| ConfigError::HttpClient {
            reason: e.to_string(),
        })?;

        Ok(Self { client, user_agent })
    }

    /// Returns the `User-Agent` header sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn user_agent_for(prefix: Option<&str>) -> String {
        let prefix = prefix.map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        format!("{prefix}RingPlus API Library v{SDK_VERSION} | Rust {rust_version}")
    }

    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: PreparedRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
                HttpMethod::Put => self.client.put(&request.url),
                HttpMethod::Delete => self.client.delete(&request.url),
            };

            builder = builder.header("Accept", "application/json");
            for (key, value) in &request.headers {
                builder = builder.header(key, value);
            }
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            if !request.form.is_empty() {
                builder = builder.form(&request.form);
            }

            let res = builder.send().await?;
            let code = res.status().as_u16();
            let headers = Self::parse_response_headers(res.headers());
            let body = res.text().await?;

            Ok(HttpResponse::new(code, headers, body))
        })
    }
}
