//! Declarative endpoint descriptions and call arguments.
//!
//! An [`Endpoint`] is plain data, declared once as a `const`:
//!
//! ```rust
//! use ringplus::rest::{Endpoint, ModelKind, PayloadType};
//!
//! const UPDATE_ACCOUNT: Endpoint = Endpoint::put("/accounts/{account_id}")
//!     .post_container("account")
//!     .allowed_param(&["name"]);
//!
//! const CALLS: Endpoint = Endpoint::get("/accounts/{account_id}/phone_calls")
//!     .payload(PayloadType::Model(ModelKind::Call))
//!     .list()
//!     .allowed_param(&["start_date", "end_date", "page", "per_page"]);
//!
//! assert_eq!(CALLS.placeholders(), vec!["account_id"]);
//! ```
//!
//! [`Args`] carries the call-time values. Positional values fill the path
//! placeholders in order; keyword values fill any placeholder not yet filled
//! and otherwise become request parameters.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use crate::clients::HttpMethod;
use crate::rest::errors::ArgumentError;
use crate::rest::factory::PayloadType;
use crate::rest::path::{build_path, placeholders};

/// Declarative description of one API operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// Path template relative to the versioned base URL.
    pub path: &'static str,
    /// HTTP method.
    pub method: HttpMethod,
    /// How the response body is interpreted; `None` requires an empty body.
    pub payload_type: Option<PayloadType>,
    /// Parse the body as a list of entities.
    pub payload_list: bool,
    /// Wrapper key for parameters, e.g. `account` → `account[name]`.
    pub post_container: Option<&'static str>,
    /// Parameter names accepted in addition to the path placeholders.
    pub allowed_param: &'static [&'static str],
}

impl Endpoint {
    /// Declares an endpoint with the given method and path.
    #[must_use]
    pub const fn new(method: HttpMethod, path: &'static str) -> Self {
        Self {
            path,
            method,
            payload_type: None,
            payload_list: false,
            post_container: None,
            allowed_param: &[],
        }
    }

    /// Declares a GET endpoint.
    #[must_use]
    pub const fn get(path: &'static str) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Declares a POST endpoint.
    #[must_use]
    pub const fn post(path: &'static str) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Declares a PUT endpoint.
    #[must_use]
    pub const fn put(path: &'static str) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Declares a DELETE endpoint.
    #[must_use]
    pub const fn delete(path: &'static str) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Sets the payload type.
    #[must_use]
    pub const fn payload(mut self, payload_type: PayloadType) -> Self {
        self.payload_type = Some(payload_type);
        self
    }

    /// Marks the payload as a list.
    #[must_use]
    pub const fn list(mut self) -> Self {
        self.payload_list = true;
        self
    }

    /// Sets the parameter wrapper key.
    #[must_use]
    pub const fn post_container(mut self, container: &'static str) -> Self {
        self.post_container = Some(container);
        self
    }

    /// Sets the accepted parameter names.
    #[must_use]
    pub const fn allowed_param(mut self, names: &'static [&'static str]) -> Self {
        self.allowed_param = names;
        self
    }

    /// Returns the path placeholder names, in order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        placeholders(self.path)
    }

    /// Returns `true` if `name` is a placeholder or an allowed parameter.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        self.allowed_param.contains(&name) || self.placeholders().contains(&name)
    }

    /// Resolves arguments into a concrete path and parameter list.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] if there are more positional values than
    /// placeholders, a name is supplied twice, a keyword is not accepted, or
    /// a placeholder is left unfilled.
    pub fn bind(&self, args: Args) -> Result<BoundCall, ArgumentError> {
        let names = self.placeholders();
        if args.positional.len() > names.len() {
            return Err(ArgumentError::TooManyPositional {
                endpoint: self.path,
                expected: names.len(),
                got: args.positional.len(),
            });
        }

        let mut path_values: HashMap<&str, String> =
            names.iter().copied().zip(args.positional).collect();
        let mut seen = HashSet::new();
        let mut params = Vec::new();

        for (key, value) in args.named {
            if !seen.insert(key.clone()) {
                return Err(ArgumentError::Duplicate { name: key });
            }
            if let Some(name) = names.iter().find(|name| **name == key) {
                if path_values.insert(name, value).is_some() {
                    return Err(ArgumentError::Duplicate { name: key });
                }
            } else if self.allowed_param.contains(&key.as_str()) {
                let key = match self.post_container {
                    Some(container) => format!("{container}[{key}]"),
                    None => key,
                };
                params.push((key, value));
            } else {
                return Err(ArgumentError::Unrecognized {
                    endpoint: self.path,
                    name: key,
                });
            }
        }

        let path = build_path(self.path, &path_values)?;
        Ok(BoundCall { path, params })
    }
}

/// An endpoint call with every argument resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundCall {
    /// The path with placeholders substituted.
    pub path: String,
    /// Request parameters, already wrapped in the post container.
    pub params: Vec<(String, String)>,
}

/// Call-time arguments: positional values plus keyword pairs.
///
/// # Example
///
/// ```rust
/// use ringplus::rest::Args;
///
/// let args = Args::new()
///     .arg(42)
///     .param("per_page", 50)
///     .opt("only_new", Some(true))
///     .opt("page", None::<u32>);
///
/// assert_eq!(args.positional(), ["42"]);
/// assert_eq!(args.named().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    positional: Vec<String>,
    named: Vec<(String, String)>,
}

impl Args {
    /// Creates an empty argument list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Appends a positional value.
    #[must_use]
    pub fn arg(mut self, value: impl Display) -> Self {
        self.positional.push(value.to_string());
        self
    }

    /// Inserts a positional value before any already given.
    #[must_use]
    pub fn prepend(mut self, value: impl Display) -> Self {
        self.positional.insert(0, value.to_string());
        self
    }

    /// Appends a keyword value.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.named.push((key.into(), value.to_string()));
        self
    }

    /// Appends a keyword value when present.
    #[must_use]
    pub fn opt(self, key: impl Into<String>, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Returns the positional values.
    #[must_use]
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Returns the keyword pairs.
    #[must_use]
    pub fn named(&self) -> &[(String, String)] {
        &self.named
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::factory::ModelKind;

    const UPDATE_ACCOUNT: Endpoint = Endpoint::put("/accounts/{account_id}")
        .post_container("account")
        .allowed_param(&["name"]);

    const USER_ACCOUNTS: Endpoint = Endpoint::get("/users/{user_id}/accounts")
        .payload(PayloadType::Model(ModelKind::Account))
        .list()
        .allowed_param(&["name", "page", "per_page"]);

    #[test]
    fn test_const_builder_fields() {
        assert_eq!(USER_ACCOUNTS.method, HttpMethod::Get);
        assert!(USER_ACCOUNTS.payload_list);
        assert_eq!(UPDATE_ACCOUNT.post_container, Some("account"));
        assert!(UPDATE_ACCOUNT.payload_type.is_none());
    }

    #[test]
    fn test_positional_fills_placeholder() {
        let call = USER_ACCOUNTS
            .bind(Args::new().arg(7).param("page", 2))
            .unwrap();
        assert_eq!(call.path, "/users/7/accounts");
        assert_eq!(call.params, vec![("page".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_keyword_fills_placeholder() {
        let call = USER_ACCOUNTS.bind(Args::new().param("user_id", 7)).unwrap();
        assert_eq!(call.path, "/users/7/accounts");
        assert!(call.params.is_empty());
    }

    #[test]
    fn test_post_container_wraps_params() {
        let call = UPDATE_ACCOUNT
            .bind(Args::new().arg(1).param("name", "Steve"))
            .unwrap();
        assert_eq!(call.path, "/accounts/1");
        assert_eq!(
            call.params,
            vec![("account[name]".to_string(), "Steve".to_string())]
        );
    }

    #[test]
    fn test_unrecognized_keyword() {
        let err = USER_ACCOUNTS
            .bind(Args::new().arg(1).param("colour", "red"))
            .unwrap_err();
        assert!(matches!(err, ArgumentError::Unrecognized { ref name, .. } if name == "colour"));
    }

    #[test]
    fn test_missing_placeholder() {
        let err = USER_ACCOUNTS.bind(Args::new().param("page", 1)).unwrap_err();
        assert!(matches!(err, ArgumentError::Missing { ref name, .. } if name == "user_id"));
    }

    #[test]
    fn test_placeholder_supplied_twice() {
        let err = USER_ACCOUNTS
            .bind(Args::new().arg(1).param("user_id", 2))
            .unwrap_err();
        assert_eq!(err, ArgumentError::Duplicate { name: "user_id".to_string() });
    }

    #[test]
    fn test_duplicate_keyword() {
        let err = USER_ACCOUNTS
            .bind(Args::new().arg(1).param("page", 1).param("page", 2))
            .unwrap_err();
        assert_eq!(err, ArgumentError::Duplicate { name: "page".to_string() });
    }

    #[test]
    fn test_too_many_positional() {
        let err = USER_ACCOUNTS.bind(Args::new().arg(1).arg(2)).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::TooManyPositional {
                endpoint: "/users/{user_id}/accounts",
                expected: 1,
                got: 2,
            }
        );
    }

    #[test]
    fn test_accepts_union_of_placeholders_and_params() {
        assert!(USER_ACCOUNTS.accepts("user_id"));
        assert!(USER_ACCOUNTS.accepts("per_page"));
        assert!(!USER_ACCOUNTS.accepts("email"));
    }

    #[test]
    fn test_opt_skips_none() {
        let args = Args::new().opt("page", Some(3)).opt("per_page", None::<u32>);
        assert_eq!(args.named(), [("page".to_string(), "3".to_string())]);
    }
}
