//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates its contents on construction so that a built
//! [`RingPlusConfig`](crate::RingPlusConfig) never carries an unusable value.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated OAuth client id.
///
/// # Example
///
/// ```rust
/// use ringplus::ClientId;
///
/// let id = ClientId::new("dd89d121bae88b36").unwrap();
/// assert_eq!(id.as_ref(), "dd89d121bae88b36");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the id is empty after trimming.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        let id = id.trim();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id.to_string()))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OAuth client secret.
///
/// The `Debug` implementation masks the value so the secret never ends up in
/// logs.
///
/// ```rust
/// use ringplus::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated API host.
///
/// Accepts either a bare host name (`api.ringplus.net`, normalized to
/// `https://api.ringplus.net`) or a full origin with scheme and optional port
/// (`http://127.0.0.1:8080`). Any trailing slash is dropped so paths can be
/// appended directly.
///
/// # Example
///
/// ```rust
/// use ringplus::HostUrl;
///
/// let host = HostUrl::new("api.ringplus.net").unwrap();
/// assert_eq!(host.as_ref(), "https://api.ringplus.net");
/// assert_eq!(host.scheme(), "https");
/// assert_eq!(host.host_name(), "api.ringplus.net");
///
/// let local = HostUrl::new("http://localhost:3000/").unwrap();
/// assert_eq!(local.as_ref(), "http://localhost:3000");
/// assert_eq!(local.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// The production API host.
    pub const DEFAULT: &'static str = "https://api.ringplus.net";

    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the value has an invalid
    /// scheme, an empty host, or contains whitespace.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim().trim_end_matches('/');
        let invalid = || ConfigError::InvalidHostUrl { url: raw.clone() };

        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return Err(invalid());
        }

        let url = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !matches!(scheme, "http" | "https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for HostUrl {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: 5,
            host_start: 8,
            host_end: Self::DEFAULT.len(),
        }
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A validated OAuth redirect URI.
///
/// Must be an absolute `http` or `https` URL; it is sent verbatim to the
/// authorization server, so no normalization is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectUri(String);

impl RedirectUri {
    /// Creates a new validated redirect URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRedirectUri`] if the value is not an
    /// absolute http(s) URL.
    pub fn new(uri: impl Into<String>) -> Result<Self, ConfigError> {
        let uri = uri.into();
        let rest = uri
            .strip_prefix("https://")
            .or_else(|| uri.strip_prefix("http://"));
        match rest {
            Some(rest) if !rest.is_empty() && !rest.contains(char::is_whitespace) => Ok(Self(uri)),
            _ => Err(ConfigError::InvalidRedirectUri { uri }),
        }
    }
}

impl AsRef<str> for RedirectUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for RedirectUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RedirectUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_rejects_empty_string() {
        assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
        assert!(matches!(ClientId::new("   "), Err(ConfigError::EmptyClientId)));
    }

    #[test]
    fn test_client_secret_masks_value_in_debug() {
        let secret = ClientSecret::new("super-secret").unwrap();
        let debug_output = format!("{secret:?}");
        assert_eq!(debug_output, "ClientSecret(*****)");
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_host_url_normalizes_bare_host() {
        let host = HostUrl::new("api.ringplus.net").unwrap();
        assert_eq!(host.as_ref(), "https://api.ringplus.net");
        assert_eq!(host.scheme(), "https");
        assert_eq!(host.host_name(), "api.ringplus.net");
    }

    #[test]
    fn test_host_url_keeps_scheme_and_port() {
        let host = HostUrl::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(host.as_ref(), "http://127.0.0.1:8080");
        assert_eq!(host.scheme(), "http");
        assert_eq!(host.host_name(), "127.0.0.1");
    }

    #[test]
    fn test_host_url_rejects_invalid() {
        assert!(HostUrl::new("").is_err());
        assert!(HostUrl::new("https://").is_err());
        assert!(HostUrl::new("ftp://example.com").is_err());
        assert!(HostUrl::new("api ringplus net").is_err());
    }

    #[test]
    fn test_host_url_default_matches_parsed_default() {
        assert_eq!(HostUrl::default(), HostUrl::new(HostUrl::DEFAULT).unwrap());
    }

    #[test]
    fn test_redirect_uri_validation() {
        assert!(RedirectUri::new("https://www.google.com").is_ok());
        assert!(RedirectUri::new("http://localhost:3000/callback").is_ok());
        assert!(RedirectUri::new("www.google.com").is_err());
        assert!(RedirectUri::new("https://").is_err());
    }

    #[test]
    fn test_redirect_uri_round_trip_serialization() {
        let original = RedirectUri::new("https://www.google.com").unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#""https://www.google.com""#);
        let restored: RedirectUri = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
