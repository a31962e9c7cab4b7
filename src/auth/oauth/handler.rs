//! The OAuth 2.0 authorization-code handler.

use std::fmt;
use std::sync::RwLock;

use chrono::Utc;

use crate::auth::oauth::{AuthCallback, AuthError, StateParam};
use crate::auth::session::{AccessToken, TokenResponse};
use crate::auth::TokenProvider;
use crate::clients::{encode_pairs, TransportError};
use crate::config::{ClientId, ClientSecret, RedirectUri};

const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";

const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Obtains and refreshes RingPlus access tokens.
///
/// The handler holds the current [`AccessToken`] and serves it to the client
/// as a [`TokenProvider`]. Exchanges replace the held token.
///
/// # Example
///
/// ```rust,ignore
/// use ringplus::auth::OAuthHandler;
/// use ringplus::{ClientId, ClientSecret, RedirectUri};
///
/// let handler = OAuthHandler::new(
///     ClientId::new("my-client-id")?,
///     ClientSecret::new("my-client-secret")?,
///     RedirectUri::new("https://example.com/callback")?,
/// );
///
/// // 1. Send the user to RingPlus
/// let url = handler.authorization_url();
///
/// // 2. Exchange the redirect they come back with
/// let token = handler.fetch_token_from_redirect(&redirect_url).await?;
///
/// // 3. Later, when the token expires
/// handler.refresh_token().await?;
/// ```
pub struct OAuthHandler {
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_uri: RedirectUri,
    authorization_base_url: String,
    token_url: String,
    client: reqwest::Client,
    state: RwLock<Option<StateParam>>,
    token: RwLock<Option<AccessToken>>,
}

// Verify OAuthHandler is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthHandler>();
};

impl OAuthHandler {
    /// RingPlus's authorization page.
    pub const AUTHORIZATION_BASE_URL: &'static str = "https://my.ringplus.net/oauth/authorize";

    /// RingPlus's token endpoint.
    pub const TOKEN_URL: &'static str = "https://my.ringplus.net/oauth/token";

    /// Creates a handler for the given application credentials.
    #[must_use]
    pub fn new(client_id: ClientId, client_secret: ClientSecret, redirect_uri: RedirectUri) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            authorization_base_url: Self::AUTHORIZATION_BASE_URL.to_string(),
            token_url: Self::TOKEN_URL.to_string(),
            client: reqwest::Client::new(),
            state: RwLock::new(None),
            token: RwLock::new(None),
        }
    }

    /// Points the handler at a different authorization server.
    #[must_use]
    pub fn with_urls(
        mut self,
        authorization_base_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        self.authorization_base_url = authorization_base_url.into();
        self.token_url = token_url.into();
        self
    }

    /// Starts with an existing token, e.g. one persisted by the caller.
    #[must_use]
    pub fn with_token(self, token: AccessToken) -> Self {
        self.set_token(token);
        self
    }

    /// Returns the URL to send the user to, with a fresh `state`.
    ///
    /// The state is remembered and checked by
    /// [`fetch_token_from_redirect`](Self::fetch_token_from_redirect).
    #[must_use]
    pub fn authorization_url(&self) -> String {
        self.authorization_url_with_state(StateParam::new())
    }

    /// Returns the authorization URL for a caller-chosen state.
    #[must_use]
    pub fn authorization_url_with_state(&self, state: StateParam) -> String {
        let query = encode_pairs(&[
            ("response_type".to_string(), "code".to_string()),
            ("client_id".to_string(), self.client_id.as_ref().to_string()),
            ("redirect_uri".to_string(), self.redirect_uri.as_ref().to_string()),
            ("state".to_string(), state.to_string()),
        ]);
        if let Ok(mut slot) = self.state.write() {
            *slot = Some(state);
        }
        format!("{}?{query}", self.authorization_base_url)
    }

    /// Returns the state of the last authorization URL.
    #[must_use]
    pub fn state(&self) -> Option<StateParam> {
        self.state.read().ok().and_then(|state| state.clone())
    }

    /// Returns the held token.
    #[must_use]
    pub fn token(&self) -> Option<AccessToken> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    /// Replaces the held token.
    pub fn set_token(&self, token: AccessToken) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token);
        }
    }

    /// Exchanges the redirect URL the user came back with for a token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCallback`] if the redirect has no code or
    ///   reports an error
    /// - [`AuthError::StateMismatch`] if the state differs from the one
    ///   generated by [`authorization_url`](Self::authorization_url)
    /// - any error from [`fetch_token`](Self::fetch_token)
    pub async fn fetch_token_from_redirect(&self, redirect_url: &str) -> Result<AccessToken, AuthError> {
        let callback = AuthCallback::from_redirect_url(redirect_url)?;

        if let Some(expected) = self.state() {
            let received = callback.state.as_deref().unwrap_or_default();
            if !expected.matches(received) {
                return Err(AuthError::StateMismatch {
                    expected: expected.to_string(),
                    received: received.to_string(),
                });
            }
        }

        self.fetch_token(&callback.code).await
    }

    /// Exchanges an authorization code for a token and holds it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExchangeFailed`] if the server rejects the
    /// code, or [`AuthError::Transport`] if it cannot be reached.
    pub async fn fetch_token(&self, code: &str) -> Result<AccessToken, AuthError> {
        let form = [
            ("grant_type", AUTHORIZATION_CODE_GRANT_TYPE),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_ref()),
            ("client_id", self.client_id.as_ref()),
            ("client_secret", self.client_secret.as_ref()),
        ];
        let token = self.request_token(&form).await?;
        tracing::debug!("obtained access token from authorization code");
        self.set_token(token.clone());
        Ok(token)
    }

    /// Exchanges the held refresh token for a new access token.
    ///
    /// When the response carries no new refresh token the old one is kept.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingRefreshToken`] if no refresh token is
    /// held, otherwise the same errors as [`fetch_token`](Self::fetch_token).
    pub async fn refresh_token(&self) -> Result<AccessToken, AuthError> {
        let refresh_token = self
            .token()
            .and_then(|token| token.refresh_token)
            .ok_or(AuthError::MissingRefreshToken)?;

        let form = [
            ("grant_type", REFRESH_TOKEN_GRANT_TYPE),
            ("client_id", self.client_id.as_ref()),
            ("client_secret", self.client_secret.as_ref()),
            ("refresh_token", refresh_token.as_str()),
        ];
        let mut token = self.request_token(&form).await?;
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token);
        }
        tracing::debug!("refreshed access token");
        self.set_token(token.clone());
        Ok(token)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<AccessToken, AuthError> {
        let response = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json")
            .form(form)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::from)?;

        if !(200..300).contains(&status) {
            return Err(AuthError::TokenExchangeFailed {
                status,
                message: body,
            });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::TokenExchangeFailed {
                status,
                message: format!("unable to parse token response: {e}"),
            })?;

        Ok(AccessToken::from_response(parsed, Utc::now()))
    }
}

impl TokenProvider for OAuthHandler {
    fn access_token(&self) -> Option<String> {
        self.token().map(|token| token.access_token)
    }
}

impl fmt::Debug for OAuthHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthHandler")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret)
            .field("redirect_uri", &self.redirect_uri)
            .field("token_url", &self.token_url)
            .field("token", &self.token())
            .finish_non_exhaustive()
    }
}
