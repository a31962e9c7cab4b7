//! Configuration types for the RingPlus client.
//!
//! # Overview
//!
//! - [`RingPlusConfig`]: all client settings, read-only once built
//! - [`RingPlusConfigBuilder`]: fluent builder for [`RingPlusConfig`]
//! - [`ClientId`], [`ClientSecret`], [`RedirectUri`]: validated OAuth credentials
//! - [`HostUrl`]: validated API host
//! - [`ApiVersion`]: the RingPlus API version to target
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use ringplus::{RingPlusConfig, HostUrl};
//!
//! let config = RingPlusConfig::builder()
//!     .host(HostUrl::new("api.ringplus.net").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .retry_count(2)
//!     .retry_delay(Duration::from_millis(500))
//!     .wait_on_rate_limit(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.retry_count(), 2);
//! assert!(config.wait_on_rate_limit());
//! ```

mod newtypes;
mod version;

pub use newtypes::{ClientId, ClientSecret, HostUrl, RedirectUri};
pub use version::ApiVersion;

use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;
use crate::rest::{ModelFactory, ResponseCache};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default wait before re-issuing a rate-limited request when the server does
/// not send `Retry-After`.
pub const DEFAULT_RATE_LIMIT_WAIT: Duration = Duration::from_secs(60);

/// Configuration for the RingPlus client.
///
/// Built once through [`RingPlusConfig::builder`] and shared read-only by
/// every request the client issues.
///
/// # Defaults
///
/// - `host`: `https://api.ringplus.net`
/// - `api_version`: [`ApiVersion::V1`]
/// - `timeout`: 60 seconds
/// - `retry_count`: 0 (no automatic retries)
/// - `retry_delay`: 0
/// - `retry_errors`: `None` (any non-2xx, non-rate-limit status is retryable)
/// - `wait_on_rate_limit`: `false`
/// - `wait_on_rate_limit_notify`: `false`
/// - `rate_limit_wait`: 60 seconds
/// - `proxy`, `user_agent_prefix`, `cache`: `None`
/// - `model_factory`: [`ModelFactory::default`]
#[derive(Clone, Debug)]
pub struct RingPlusConfig {
    host: HostUrl,
    api_version: ApiVersion,
    timeout: Duration,
    retry_count: u32,
    retry_delay: Duration,
    retry_errors: Option<Vec<u16>>,
    wait_on_rate_limit: bool,
    wait_on_rate_limit_notify: bool,
    rate_limit_wait: Duration,
    proxy: Option<String>,
    user_agent_prefix: Option<String>,
    model_factory: ModelFactory,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl RingPlusConfig {
    /// Creates a new builder for constructing a `RingPlusConfig`.
    #[must_use]
    pub fn builder() -> RingPlusConfigBuilder {
        RingPlusConfigBuilder::new()
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the base URL every endpoint path is appended to, e.g.
    /// `https://api.ringplus.net/v1`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/{}", self.host, self.api_version)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns how many times an idempotent request is retried.
    #[must_use]
    pub const fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Returns the delay between retry attempts.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the status codes that trigger a retry, if restricted.
    #[must_use]
    pub fn retry_errors(&self) -> Option<&[u16]> {
        self.retry_errors.as_deref()
    }

    /// Returns whether rate-limited requests are re-issued after a wait.
    #[must_use]
    pub const fn wait_on_rate_limit(&self) -> bool {
        self.wait_on_rate_limit
    }

    /// Returns whether a rate-limit wait is logged before sleeping.
    #[must_use]
    pub const fn wait_on_rate_limit_notify(&self) -> bool {
        self.wait_on_rate_limit_notify
    }

    /// Returns the fallback wait used when the server gives no `Retry-After`.
    #[must_use]
    pub const fn rate_limit_wait(&self) -> Duration {
        self.rate_limit_wait
    }

    /// Returns the proxy URL, if configured.
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the model factory used to parse response payloads.
    #[must_use]
    pub const fn model_factory(&self) -> &ModelFactory {
        &self.model_factory
    }

    /// Returns the response cache, if one is plugged in.
    #[must_use]
    pub fn cache(&self) -> Option<&Arc<dyn ResponseCache>> {
        self.cache.as_ref()
    }
}

impl Default for RingPlusConfig {
    fn default() -> Self {
        Self {
            host: HostUrl::default(),
            api_version: ApiVersion::default(),
            timeout: DEFAULT_TIMEOUT,
            retry_count: 0,
            retry_delay: Duration::ZERO,
            retry_errors: None,
            wait_on_rate_limit: false,
            wait_on_rate_limit_notify: false,
            rate_limit_wait: DEFAULT_RATE_LIMIT_WAIT,
            proxy: None,
            user_agent_prefix: None,
            model_factory: ModelFactory::default(),
            cache: None,
        }
    }
}

// Verify RingPlusConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RingPlusConfig>();
};

/// Builder for constructing [`RingPlusConfig`] instances.
///
/// Every field is optional; unset fields take the defaults listed on
/// [`RingPlusConfig`].
#[derive(Debug, Default)]
pub struct RingPlusConfigBuilder {
    host: Option<HostUrl>,
    api_version: Option<ApiVersion>,
    timeout: Option<Duration>,
    retry_count: Option<u32>,
    retry_delay: Option<Duration>,
    retry_errors: Option<Vec<u16>>,
    wait_on_rate_limit: Option<bool>,
    wait_on_rate_limit_notify: Option<bool>,
    rate_limit_wait: Option<Duration>,
    proxy: Option<String>,
    user_agent_prefix: Option<String>,
    model_factory: Option<ModelFactory>,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl RingPlusConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how many times a GET request is retried on transient failure.
    #[must_use]
    pub const fn retry_count(mut self, count: u32) -> Self {
        self.retry_count = Some(count);
        self
    }

    /// Sets the delay between retry attempts.
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Restricts status-code retries to the given codes.
    ///
    /// Transport failures are always retryable regardless of this list.
    #[must_use]
    pub fn retry_errors(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retry_errors = Some(codes.into_iter().collect());
        self
    }

    /// Re-issue a rate-limited request once after waiting.
    #[must_use]
    pub const fn wait_on_rate_limit(mut self, enabled: bool) -> Self {
        self.wait_on_rate_limit = Some(enabled);
        self
    }

    /// Log a warning before sleeping on a rate limit.
    #[must_use]
    pub const fn wait_on_rate_limit_notify(mut self, enabled: bool) -> Self {
        self.wait_on_rate_limit_notify = Some(enabled);
        self
    }

    /// Sets the wait used when a rate-limited response has no `Retry-After`.
    #[must_use]
    pub const fn rate_limit_wait(mut self, wait: Duration) -> Self {
        self.rate_limit_wait = Some(wait);
        self
    }

    /// Routes every request through the given proxy URL.
    #[must_use]
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Sets a prefix prepended to the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Replaces the model factory used to parse payloads.
    #[must_use]
    pub fn model_factory(mut self, factory: ModelFactory) -> Self {
        self.model_factory = Some(factory);
        self
    }

    /// Plugs in a response cache for GET requests.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the [`RingPlusConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxy`] if the proxy URL is rejected.
    pub fn build(self) -> Result<RingPlusConfig, ConfigError> {
        if let Some(proxy) = &self.proxy {
            reqwest::Proxy::all(proxy.as_str()).map_err(|e| ConfigError::InvalidProxy {
                url: proxy.clone(),
                reason: e.to_string(),
            })?;
        }

        let defaults = RingPlusConfig::default();
        Ok(RingPlusConfig {
            host: self.host.unwrap_or(defaults.host),
            api_version: self.api_version.unwrap_or(defaults.api_version),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            retry_count: self.retry_count.unwrap_or(defaults.retry_count),
            retry_delay: self.retry_delay.unwrap_or(defaults.retry_delay),
            retry_errors: self.retry_errors,
            wait_on_rate_limit: self.wait_on_rate_limit.unwrap_or(false),
            wait_on_rate_limit_notify: self.wait_on_rate_limit_notify.unwrap_or(false),
            rate_limit_wait: self.rate_limit_wait.unwrap_or(defaults.rate_limit_wait),
            proxy: self.proxy,
            user_agent_prefix: self.user_agent_prefix,
            model_factory: self.model_factory.unwrap_or(defaults.model_factory),
            cache: self.cache,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RingPlusConfig::builder().build().unwrap();
        assert_eq!(config.host().as_ref(), "https://api.ringplus.net");
        assert_eq!(config.api_version(), ApiVersion::V1);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.retry_count(), 0);
        assert_eq!(config.retry_delay(), Duration::ZERO);
        assert!(config.retry_errors().is_none());
        assert!(!config.wait_on_rate_limit());
        assert!(!config.wait_on_rate_limit_notify());
        assert_eq!(config.rate_limit_wait(), DEFAULT_RATE_LIMIT_WAIT);
        assert!(config.proxy().is_none());
        assert!(config.cache().is_none());
    }

    #[test]
    fn test_base_url_joins_host_and_version() {
        let config = RingPlusConfig::builder()
            .host(HostUrl::new("http://localhost:9000/").unwrap())
            .api_version(ApiVersion::Custom(2))
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "http://localhost:9000/v2");
    }

    #[test]
    fn test_retry_settings_are_kept() {
        let config = RingPlusConfig::builder()
            .retry_count(3)
            .retry_delay(Duration::from_millis(250))
            .retry_errors([500, 502, 503])
            .build()
            .unwrap();
        assert_eq!(config.retry_count(), 3);
        assert_eq!(config.retry_delay(), Duration::from_millis(250));
        assert_eq!(config.retry_errors(), Some(&[500, 502, 503][..]));
    }

    #[test]
    fn test_invalid_proxy_is_rejected() {
        let result = RingPlusConfig::builder().proxy("not a url").build();
        assert!(matches!(result, Err(ConfigError::InvalidProxy { .. })));
    }

    #[test]
    fn test_valid_proxy_is_accepted() {
        let config = RingPlusConfig::builder()
            .proxy("http://proxy.local:3128")
            .build()
            .unwrap();
        assert_eq!(config.proxy(), Some("http://proxy.local:3128"));
    }
}
