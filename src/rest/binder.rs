//! The generic endpoint executor.
//!
//! [`Binder::execute`] turns an [`Endpoint`] plus [`Args`] into one logical
//! HTTP call:
//!
//! 1. Bind arguments to the path and parameters (no I/O on failure)
//! 2. Attach the bearer token from the [`TokenProvider`]
//! 3. Serve GETs from the response cache when possible, keyed per token
//! 4. Send, retrying GETs on transport failures and retryable statuses
//! 5. Sleep and re-issue once on a rate limit, when configured to
//! 6. Interpret the body according to the endpoint's payload type

use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::auth::{AuthError, TokenProvider};
use crate::clients::{HttpMethod, HttpResponse, HttpTransport, PreparedRequest};
use crate::config::RingPlusConfig;
use crate::rest::endpoint::{Args, Endpoint};
use crate::rest::errors::{ParseError, RingPlusError};
use crate::rest::factory::PayloadType;
use crate::rest::model::ApiRef;
use crate::rest::response::Payload;

/// Executes declarative endpoints against the RingPlus API.
///
/// The binder holds no mutable state of its own; the configuration is fixed
/// at construction and the optional cache synchronizes itself.
pub struct Binder {
    config: RingPlusConfig,
    auth: Arc<dyn TokenProvider>,
    transport: Arc<dyn HttpTransport>,
}

// Verify Binder is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Binder>();
};

impl Binder {
    /// Creates a binder from its three collaborators.
    #[must_use]
    pub fn new(
        config: RingPlusConfig,
        auth: Arc<dyn TokenProvider>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            config,
            auth,
            transport,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RingPlusConfig {
        &self.config
    }

    /// Returns the auth collaborator.
    #[must_use]
    pub fn auth(&self) -> &Arc<dyn TokenProvider> {
        &self.auth
    }

    /// Executes `endpoint` with `args`.
    ///
    /// Entities in the result are attached to `api`.
    ///
    /// # Errors
    ///
    /// - [`RingPlusError::Argument`] if the arguments do not fit the endpoint
    /// - [`RingPlusError::Auth`] if no access token is available
    /// - [`RingPlusError::Transport`] if no response arrived after retries
    /// - [`RingPlusError::Api`] or [`RingPlusError::RateLimit`] for non-2xx
    ///   responses
    /// - [`RingPlusError::Parse`] if the body does not match the payload type
    pub async fn execute(
        &self,
        api: &ApiRef,
        endpoint: &Endpoint,
        args: Args,
    ) -> Result<Payload, RingPlusError> {
        let call = endpoint.bind(args)?;
        let token = self.auth.access_token().ok_or(AuthError::MissingToken)?;

        let url = format!("{}{}", self.config.base_url(), call.path);
        let request = call
            .params
            .into_iter()
            .fold(PreparedRequest::builder(endpoint.method, url), |builder, (key, value)| {
                builder.param(key, value)
            })
            .header("Authorization", format!("Bearer {token}"))
            .build();

        let cache = self
            .config
            .cache()
            .filter(|_| request.method == HttpMethod::Get);
        let cache_key = format!("{} {}", token_fingerprint(&token), request.cache_key());

        if let Some(cached) = cache.and_then(|cache| cache.get(&cache_key)) {
            tracing::debug!(url = %request.url, "serving response from cache");
            return self.interpret(api, endpoint, &cached);
        }

        let response = match self.send_with_retries(&request).await {
            Err(RingPlusError::RateLimit(error)) if self.config.wait_on_rate_limit() => {
                let wait = error.retry_after.unwrap_or_else(|| self.config.rate_limit_wait());
                if self.config.wait_on_rate_limit_notify() {
                    tracing::warn!(
                        url = %request.url,
                        wait_secs = wait.as_secs_f64(),
                        "rate limit reached, sleeping before re-issuing the request"
                    );
                }
                tokio::time::sleep(wait).await;
                self.send_with_retries(&request).await?
            }
            other => other?,
        };

        let payload = self.interpret(api, endpoint, &response)?;
        if let Some(cache) = cache {
            cache.set(&cache_key, response);
        }
        Ok(payload)
    }

    /// Sends `request`, retrying GETs up to `retry_count` times.
    async fn send_with_retries(&self, request: &PreparedRequest) -> Result<HttpResponse, RingPlusError> {
        let max_attempts = if request.method.is_retryable() {
            self.config.retry_count().saturating_add(1)
        } else {
            1
        };

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            tracing::debug!(method = %request.method, url = %request.url, attempt, "sending request");

            let error = match self.transport.send(request.clone()).await {
                Ok(response) if response.is_ok() => return Ok(response),
                Ok(response) => {
                    let error = RingPlusError::from_response(&response);
                    if !self.is_retryable_status(&error) {
                        return Err(error);
                    }
                    error
                }
                Err(error) => RingPlusError::Transport(error),
            };

            if attempt >= max_attempts {
                return Err(error);
            }

            tracing::warn!(
                method = %request.method,
                url = %request.url,
                attempt,
                max_attempts,
                error = %error,
                "request failed, retrying"
            );
            pause(self.config.retry_delay()).await;
        }
    }

    fn is_retryable_status(&self, error: &RingPlusError) -> bool {
        let Some(status) = error.status() else {
            return false;
        };
        match self.config.retry_errors() {
            Some(codes) => codes.contains(&status),
            None => !error.is_rate_limit(),
        }
    }

    fn interpret(
        &self,
        api: &ApiRef,
        endpoint: &Endpoint,
        response: &HttpResponse,
    ) -> Result<Payload, RingPlusError> {
        let Some(payload_type) = endpoint.payload_type else {
            if response.is_empty() {
                return Ok(Payload::Empty);
            }
            return Err(unexpected_body(response).into());
        };
        let payload_name = payload_type.name();

        if response.is_empty() {
            return Err(ParseError::new(payload_name, "expected a response body, got none").into());
        }

        let json = response
            .json()
            .map_err(|e| ParseError::new(payload_name, format!("invalid JSON: {e}")))?;

        match payload_type {
            PayloadType::Json => Ok(Payload::Json(json)),
            PayloadType::Ids => Ok(Payload::Ids(parse_ids(json)?)),
            PayloadType::Model(kind) => {
                let factory = self.config.model_factory();
                if endpoint.payload_list {
                    Ok(Payload::List(factory.parse_list(kind, api, &json)?))
                } else {
                    Ok(Payload::Model(factory.parse(kind, api, &json)?))
                }
            }
        }
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Longest body excerpt quoted in an unexpected-body error.
const BODY_EXCERPT_CHARS: usize = 200;

/// Error for a 2xx body on an endpoint declared to return nothing.
fn unexpected_body(response: &HttpResponse) -> ParseError {
    let body = response.body.trim();
    let mut excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
    if excerpt.len() < body.len() {
        excerpt.push_str("...");
    }
    ParseError::new(
        "empty",
        format!(
            "expected no content, got {} {} with body: {excerpt}",
            response.code,
            response.reason()
        ),
    )
}

/// Short hex digest of an access token, used to scope cache entries.
fn token_fingerprint(token: &str) -> String {
    Sha256::digest(token.as_bytes())
        .iter()
        .take(8)
        .fold(String::with_capacity(16), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}

/// Accepts a bare list or an object with an `ids` list.
fn parse_ids(json: Value) -> Result<Vec<Value>, ParseError> {
    match json {
        Value::Array(ids) => Ok(ids),
        Value::Object(mut map) => match map.remove("ids") {
            Some(Value::Array(ids)) => Ok(ids),
            _ => Err(ParseError::new("ids", "expected an object with an 'ids' list")),
        },
        _ => Err(ParseError::new("ids", "expected a list or an object with an 'ids' list")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use crate::clients::{BoxFuture, TransportError, TransportErrorKind};
    use crate::rest::factory::ModelKind;
    use serde_json::json;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Replays canned outcomes and records every request it sees.
    #[derive(Default)]
    struct Scripted {
        outcomes: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        seen: Mutex<Vec<PreparedRequest>>,
    }

    impl Scripted {
        fn new(outcomes: Vec<Result<HttpResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                seen: Mutex::default(),
            })
        }

        fn requests(&self) -> Vec<PreparedRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl HttpTransport for Scripted {
        fn send<'a>(
            &'a self,
            request: PreparedRequest,
        ) -> BoxFuture<'a, Result<HttpResponse, TransportError>> {
            self.seen.lock().unwrap().push(request);
            let next = self.outcomes.lock().unwrap().pop_front();
            Box::pin(async move {
                next.unwrap_or_else(|| Err(TransportError::new(TransportErrorKind::Other, "script exhausted")))
            })
        }
    }

    fn ok(body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(200, HashMap::new(), body))
    }

    fn status(code: u16, body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(code, HashMap::new(), body))
    }

    fn binder(config: RingPlusConfig, transport: Arc<Scripted>) -> Binder {
        Binder::new(config, Arc::new(StaticToken::new("tok")), transport)
    }

    const GET_ACCOUNT: Endpoint = Endpoint::get("/accounts/{account_id}")
        .payload(PayloadType::Model(ModelKind::Account));

    const ACCOUNT_IDS: Endpoint = Endpoint::get("/accounts/ids").payload(PayloadType::Ids);

    const UPDATE_ACCOUNT: Endpoint = Endpoint::put("/accounts/{account_id}")
        .post_container("account")
        .allowed_param(&["name"]);

    #[tokio::test]
    async fn test_request_carries_bearer_token_and_versioned_url() {
        let transport = Scripted::new(vec![ok(r#"{"account":{"id":12}}"#)]);
        let binder = binder(RingPlusConfig::default(), transport.clone());

        let payload = binder
            .execute(&ApiRef::detached(), &GET_ACCOUNT, Args::new().arg(12))
            .await
            .unwrap();

        assert_eq!(payload.into_json(), json!({"id": 12}));
        let sent = transport.requests();
        assert_eq!(sent[0].url, "https://api.ringplus.net/v1/accounts/12");
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_put_sends_container_form_and_accepts_empty_body() {
        let transport = Scripted::new(vec![status(204, "")]);
        let binder = binder(RingPlusConfig::default(), transport.clone());

        let payload = binder
            .execute(&ApiRef::detached(), &UPDATE_ACCOUNT, Args::new().arg(1).param("name", "Steve"))
            .await
            .unwrap();

        assert_eq!(payload, Payload::Empty);
        let sent = transport.requests();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].form, vec![("account[name]".to_string(), "Steve".to_string())]);
        assert!(sent[0].query.is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_body_on_empty_endpoint_is_parse_error() {
        let transport = Scripted::new(vec![ok(r#"{"unexpected":true}"#)]);
        let binder = binder(RingPlusConfig::default(), transport);

        let err = binder
            .execute(&ApiRef::detached(), &UPDATE_ACCOUNT, Args::new().arg(1).param("name", "Steve"))
            .await
            .unwrap_err();
        let error = match err {
            RingPlusError::Parse(error) => error,
            other => panic!("expected a parse error, got {other:?}"),
        };
        assert_eq!(error.payload, "empty");
        assert!(error.reason.contains("200 OK"));
        assert!(error.reason.contains(r#"{"unexpected":true}"#));
    }

    #[test]
    fn test_unexpected_body_excerpt_is_truncated() {
        let body = "x".repeat(BODY_EXCERPT_CHARS * 2);
        let error = unexpected_body(&HttpResponse::new(200, HashMap::new(), body));
        assert!(error.reason.ends_with("..."));
        assert!(error.reason.len() < BODY_EXCERPT_CHARS + 100);
    }

    #[tokio::test]
    async fn test_empty_body_for_model_payload_is_parse_error() {
        let transport = Scripted::new(vec![status(204, "")]);
        let binder = binder(RingPlusConfig::default(), transport);

        let err = binder
            .execute(&ApiRef::detached(), &GET_ACCOUNT, Args::new().arg(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RingPlusError::Parse(ref e) if e.payload == "account"));
    }

    #[tokio::test]
    async fn test_ids_payload_shapes() {
        let transport = Scripted::new(vec![ok("[1,2]"), ok(r#"{"ids":[3]}"#), ok(r#"{"other":1}"#)]);
        let binder = binder(RingPlusConfig::default(), transport);
        let api = ApiRef::detached();

        let ids = binder.execute(&api, &ACCOUNT_IDS, Args::new()).await.unwrap();
        assert_eq!(ids.into_ids().unwrap(), vec![json!(1), json!(2)]);

        let ids = binder.execute(&api, &ACCOUNT_IDS, Args::new()).await.unwrap();
        assert_eq!(ids.into_ids().unwrap(), vec![json!(3)]);

        let err = binder.execute(&api, &ACCOUNT_IDS, Args::new()).await.unwrap_err();
        assert!(matches!(err, RingPlusError::Parse(_)));
    }

    #[tokio::test]
    async fn test_missing_token_stops_before_transport() {
        let transport = Scripted::new(vec![]);
        let binder = Binder::new(
            RingPlusConfig::default(),
            Arc::new(StaticToken::none()),
            transport.clone(),
        );

        let err = binder
            .execute(&ApiRef::detached(), &GET_ACCOUNT, Args::new().arg(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RingPlusError::Auth(AuthError::MissingToken)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_retries_on_5xx_until_success() {
        let config = RingPlusConfig::builder().retry_count(2).build().unwrap();
        let transport = Scripted::new(vec![status(500, ""), status(502, ""), ok(r#"{"id":1}"#)]);
        let binder = binder(config, transport.clone());

        let payload = binder
            .execute(&ApiRef::detached(), &GET_ACCOUNT, Args::new().arg(1))
            .await
            .unwrap();
        assert_eq!(payload.shape(), "model");
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_retry_errors_limits_retryable_statuses() {
        let config = RingPlusConfig::builder()
            .retry_count(3)
            .retry_errors([503])
            .build()
            .unwrap();
        let transport = Scripted::new(vec![status(503, ""), status(500, "")]);
        let binder = binder(config, transport.clone());

        let err = binder
            .execute(&ApiRef::detached(), &GET_ACCOUNT, Args::new().arg(1))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried_without_wait() {
        let config = RingPlusConfig::builder().retry_count(3).build().unwrap();
        let transport = Scripted::new(vec![status(429, "")]);
        let binder = binder(config, transport.clone());

        let err = binder
            .execute(&ApiRef::detached(), &GET_ACCOUNT, Args::new().arg(1))
            .await
            .unwrap_err();
        assert!(err.is_rate_limit());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_wait_on_rate_limit_reissues_once() {
        let config = RingPlusConfig::builder()
            .wait_on_rate_limit(true)
            .wait_on_rate_limit_notify(true)
            .rate_limit_wait(Duration::from_millis(1))
            .build()
            .unwrap();
        let transport = Scripted::new(vec![
            status(400, r#"{"errors":[{"code":88,"message":"Rate limit exceeded"}]}"#),
            ok(r#"{"id":9}"#),
        ]);
        let binder = binder(config, transport.clone());

        let account = binder
            .execute(&ApiRef::detached(), &GET_ACCOUNT, Args::new().arg(9))
            .await
            .unwrap();
        assert_eq!(account.into_json(), json!({"id": 9}));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_cache_serves_repeated_gets() {
        let cache = Arc::new(crate::rest::MemoryCache::new(Duration::from_secs(60)));
        let config = RingPlusConfig::builder().cache(cache.clone()).build().unwrap();
        let transport = Scripted::new(vec![ok(r#"{"id":5}"#)]);
        let binder = binder(config, transport.clone());
        let api = ApiRef::detached();

        let first = binder.execute(&api, &GET_ACCOUNT, Args::new().arg(5)).await.unwrap();
        let second = binder.execute(&api, &GET_ACCOUNT, Args::new().arg(5)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_entries_are_scoped_to_the_token() {
        let cache = Arc::new(crate::rest::MemoryCache::new(Duration::from_secs(60)));
        let config = RingPlusConfig::builder().cache(cache.clone()).build().unwrap();
        let transport = Scripted::new(vec![ok(r#"{"id":5,"name":"Alice"}"#), ok(r#"{"id":5}"#)]);
        let alice = Binder::new(config.clone(), Arc::new(StaticToken::new("alice")), transport.clone());
        let bob = Binder::new(config, Arc::new(StaticToken::new("bob")), transport.clone());
        let api = ApiRef::detached();

        alice.execute(&api, &GET_ACCOUNT, Args::new().arg(5)).await.unwrap();
        let seen_by_bob = bob.execute(&api, &GET_ACCOUNT, Args::new().arg(5)).await.unwrap();

        assert_eq!(seen_by_bob.into_json(), json!({"id": 5}));
        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].header("authorization"), Some("Bearer bob"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_token_fingerprint_is_short_and_stable() {
        let fingerprint = token_fingerprint("alice");
        assert_eq!(fingerprint.len(), 16);
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fingerprint, token_fingerprint("alice"));
        assert_ne!(fingerprint, token_fingerprint("bob"));
        assert!(!fingerprint.contains("alice"));
    }

    #[test]
    fn test_debug_hides_transport() {
        let binder = Binder::new(
            RingPlusConfig::default(),
            Arc::new(StaticToken::new("s3cr3t")),
            Scripted::new(vec![]),
        );
        let debug = format!("{binder:?}");
        assert!(debug.starts_with("Binder"));
        assert!(!debug.contains("s3cr3t"));
    }
}
