//! HTTP request types for the RingPlus client.
//!
//! The binder resolves an endpoint call into a [`PreparedRequest`]: a fully
//! qualified URL plus headers, query pairs and form fields. Transports only
//! ever see prepared requests.

use std::fmt;

/// HTTP methods used by the RingPlus API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    #[default]
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` if a failed request with this method may be retried
    /// automatically. Only reads qualify.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Get)
    }

    /// Returns `true` if parameters travel in the request body rather than the
    /// query string.
    #[must_use]
    pub const fn sends_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved HTTP request, ready for a transport.
///
/// Parameters are kept as ordered key/value pairs so that the bracketed
/// form convention (`account[name]=Steve`) and repeated keys survive intact.
///
/// # Example
///
/// ```rust
/// use ringplus::clients::{HttpMethod, PreparedRequest};
///
/// let request = PreparedRequest::builder(HttpMethod::Get, "https://api.ringplus.net/v1/accounts")
///     .query_param("page", "2")
///     .header("Accept", "application/json")
///     .build();
///
/// assert_eq!(request.url_with_query(), "https://api.ringplus.net/v1/accounts?page=2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL, without query string.
    pub url: String,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
    /// Form body pairs (`application/x-www-form-urlencoded`).
    pub form: Vec<(String, String)>,
}

impl PreparedRequest {
    /// Creates a new builder for a request.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> PreparedRequestBuilder {
        PreparedRequestBuilder::new(method, url)
    }

    /// Returns the value of the first header with the given name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the URL with the query pairs percent-encoded and appended.
    #[must_use]
    pub fn url_with_query(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        format!("{}?{}", self.url, encode_pairs(&self.query))
    }

    /// Returns a key identifying this request for response caching.
    ///
    /// Headers are excluded. Callers that share a cache between credentials
    /// must scope the key themselves; the binder prefixes it with a
    /// fingerprint of the access token.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let mut key = format!("{} {}", self.method, self.url_with_query());
        if !self.form.is_empty() {
            key.push(' ');
            key.push_str(&encode_pairs(&self.form));
        }
        key
    }
}

/// Percent-encodes key/value pairs as `k=v&k2=v2`.
#[must_use]
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Builder for [`PreparedRequest`].
#[derive(Debug)]
pub struct PreparedRequestBuilder {
    request: PreparedRequest,
}

impl PreparedRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            request: PreparedRequest {
                method,
                url: url.into(),
                headers: Vec::new(),
                query: Vec::new(),
                form: Vec::new(),
            },
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((key.into(), value.into()));
        self
    }

    /// Adds a query string pair.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Adds a form body field.
    #[must_use]
    pub fn form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.form.push((key.into(), value.into()));
        self
    }

    /// Adds a parameter where the method expects it: the form body for
    /// POST/PUT, the query string otherwise.
    #[must_use]
    pub fn param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if self.request.method.sends_body() {
            self.form_field(key, value)
        } else {
            self.query_param(key, value)
        }
    }

    /// Finishes the request.
    #[must_use]
    pub fn build(self) -> PreparedRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_get_is_retryable() {
        assert!(HttpMethod::Get.is_retryable());
        assert!(!HttpMethod::Post.is_retryable());
        assert!(!HttpMethod::Put.is_retryable());
        assert!(!HttpMethod::Delete.is_retryable());
    }

    #[test]
    fn test_param_routes_by_method() {
        let get = PreparedRequest::builder(HttpMethod::Get, "https://h/v1/users")
            .param("page", "1")
            .build();
        assert_eq!(get.query, vec![("page".to_string(), "1".to_string())]);
        assert!(get.form.is_empty());

        let delete = PreparedRequest::builder(HttpMethod::Delete, "https://h/v1/x")
            .param("a", "b")
            .build();
        assert_eq!(delete.query.len(), 1);

        let put = PreparedRequest::builder(HttpMethod::Put, "https://h/v1/accounts/1")
            .param("account[name]", "Steve")
            .build();
        assert!(put.query.is_empty());
        assert_eq!(
            put.form,
            vec![("account[name]".to_string(), "Steve".to_string())]
        );
    }

    #[test]
    fn test_url_with_query_encodes_values() {
        let request = PreparedRequest::builder(HttpMethod::Get, "https://h/v1/users")
            .query_param("email_address", "a b@example.com")
            .build();
        assert_eq!(
            request.url_with_query(),
            "https://h/v1/users?email_address=a%20b%40example.com"
        );
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = PreparedRequest::builder(HttpMethod::Get, "https://h")
            .header("Authorization", "Bearer t")
            .build();
        assert_eq!(request.header("authorization"), Some("Bearer t"));
        assert_eq!(request.header("accept"), None);
    }

    #[test]
    fn test_cache_key_ignores_headers() {
        let a = PreparedRequest::builder(HttpMethod::Get, "https://h/v1/accounts")
            .header("Authorization", "Bearer one")
            .query_param("page", "1")
            .build();
        let b = PreparedRequest::builder(HttpMethod::Get, "https://h/v1/accounts")
            .header("Authorization", "Bearer two")
            .query_param("page", "1")
            .build();
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), "GET https://h/v1/accounts?page=1");
    }
}
