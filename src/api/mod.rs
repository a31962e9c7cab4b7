//! The RingPlus API client.
//!
//! [`Api`] exposes one typed async method per endpoint in [`endpoints`].
//! Path ids are plain arguments; filters, paging and mutation fields are
//! passed as keyword [`Args`]:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ringplus::{Api, Args, RingPlusConfig};
//! use ringplus::auth::StaticToken;
//!
//! let api = Api::new(Arc::new(StaticToken::new("access-token")), RingPlusConfig::default())?;
//!
//! let account = api.get_account(42).await?;
//! let calls = api
//!     .calls(42, Args::new().param("start_date", "2016-01-01").param("per_page", 50))
//!     .await?;
//! api.update_account(42, Args::new().param("name", "Work phone")).await?;
//! ```
//!
//! Unknown keywords are rejected before any request is sent. Entities
//! returned by the client keep a weak back-reference to it, so follow-up
//! calls such as [`Account::calls`](crate::Account::calls) work for as long
//! as the client is alive.

pub mod endpoints;

use std::fmt;
use std::sync::Arc;

use crate::auth::TokenProvider;
use crate::clients::{HttpTransport, ReqwestTransport};
use crate::config::RingPlusConfig;
use crate::error::ConfigError;
use crate::rest::resources::{
    Account, Call, CarrierService, Data, FluidCallCredential, Request, Text, User, Voicemail,
};
use crate::rest::{ApiRef, Args, Binder, Endpoint, Payload, ResultSet, RingPlusError};

/// A RingPlus API client.
///
/// Cloning is cheap and clones share the same connection pool, token
/// provider and cache.
#[derive(Clone)]
pub struct Api {
    inner: Arc<ApiInner>,
}

pub(crate) struct ApiInner {
    binder: Binder,
}

// Verify Api is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Api>();
};

impl Api {
    /// Creates a client that talks to RingPlus over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the HTTP client cannot be built, e.g.
    /// for an unusable proxy URL.
    pub fn new(auth: Arc<dyn TokenProvider>, config: RingPlusConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(auth, config, Arc::new(transport)))
    }

    /// Creates a client with a custom transport.
    #[must_use]
    pub fn with_transport(
        auth: Arc<dyn TokenProvider>,
        config: RingPlusConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            inner: Arc::new(ApiInner {
                binder: Binder::new(config, auth, transport),
            }),
        }
    }

    pub(crate) const fn from_inner(inner: Arc<ApiInner>) -> Self {
        Self { inner }
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &RingPlusConfig {
        self.inner.binder.config()
    }

    /// Returns the token provider.
    #[must_use]
    pub fn auth(&self) -> &Arc<dyn TokenProvider> {
        self.inner.binder.auth()
    }

    /// Executes any endpoint, returning the untyped [`Payload`].
    ///
    /// # Errors
    ///
    /// See [`Binder::execute`].
    pub async fn execute(&self, endpoint: &Endpoint, args: Args) -> Result<Payload, RingPlusError> {
        self.inner
            .binder
            .execute(&ApiRef::new(&self.inner), endpoint, args)
            .await
    }

    async fn model<T: crate::rest::Model>(&self, endpoint: &Endpoint, args: Args) -> Result<T, RingPlusError> {
        Ok(self.execute(endpoint, args).await?.into_model()?)
    }

    async fn list<T: crate::rest::Model>(
        &self,
        endpoint: &Endpoint,
        args: Args,
    ) -> Result<ResultSet<T>, RingPlusError> {
        Ok(self.execute(endpoint, args).await?.into_list()?)
    }

    // Accounts

    /// Lists the accounts of a user.
    ///
    /// Accepts `name`, `email_address`, `phone_number`, `device_esn`,
    /// `device_iccid`, `page` and `per_page`.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn user_accounts(&self, user_id: i64, args: Args) -> Result<ResultSet<Account>, RingPlusError> {
        self.list(&endpoints::USER_ACCOUNTS, args.prepend(user_id)).await
    }

    /// Lists every account the token has access to.
    ///
    /// Accepts the same filters as [`user_accounts`](Self::user_accounts).
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn accounts(&self, args: Args) -> Result<ResultSet<Account>, RingPlusError> {
        self.list(&endpoints::ACCOUNTS, args).await
    }

    /// Fetches one account with its services, device and voicemail box.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn get_account(&self, account_id: i64) -> Result<Account, RingPlusError> {
        self.model(&endpoints::GET_ACCOUNT, Args::new().arg(account_id)).await
    }

    /// Updates an account. Accepts `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn update_account(&self, account_id: i64, args: Args) -> Result<(), RingPlusError> {
        self.execute(&endpoints::UPDATE_ACCOUNT, args.prepend(account_id))
            .await
            .map(drop)
    }

    // Account registration

    /// Requests registration of a device as a new account of a user.
    ///
    /// Expects `name`, `billing_plan_id`, `device_esn` and `credit_card_id`;
    /// accepts `device_iccid`.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn register_account(&self, user_id: i64, args: Args) -> Result<Request, RingPlusError> {
        self.model(&endpoints::REGISTER_ACCOUNT, args.prepend(user_id)).await
    }

    /// Fetches the state of an account registration request.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn register_account_status(&self, request_id: i64) -> Result<Request, RingPlusError> {
        self.model(&endpoints::REGISTER_ACCOUNT_STATUS, Args::new().arg(request_id))
            .await
    }

    // Device change

    /// Requests moving an account to another device. Accepts `device_esn`
    /// and `device_iccid`.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn change_device(&self, account_id: i64, args: Args) -> Result<Request, RingPlusError> {
        self.model(&endpoints::CHANGE_DEVICE, args.prepend(account_id)).await
    }

    /// Fetches the state of a device change request.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn change_device_status(&self, request_id: i64) -> Result<Request, RingPlusError> {
        self.model(&endpoints::CHANGE_DEVICE_STATUS, Args::new().arg(request_id))
            .await
    }

    // Phone number change

    /// Requests a new phone number for an account.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn change_phone_number(&self, account_id: i64) -> Result<Request, RingPlusError> {
        self.model(&endpoints::CHANGE_PHONE_NUMBER, Args::new().arg(account_id))
            .await
    }

    /// Fetches the state of a phone number change request.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn change_phone_number_status(&self, request_id: i64) -> Result<Request, RingPlusError> {
        self.model(&endpoints::CHANGE_PHONE_NUMBER_STATUS, Args::new().arg(request_id))
            .await
    }

    // Carrier services and FluidCall

    /// Lists the carrier services enforced on an account.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn enforced_carrier_services(
        &self,
        account_id: i64,
        args: Args,
    ) -> Result<ResultSet<CarrierService>, RingPlusError> {
        self.list(&endpoints::ENFORCED_CARRIER_SERVICES, args.prepend(account_id))
            .await
    }

    /// Lists the FluidCall credentials of an account.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn fluid_call_credentials(
        &self,
        account_id: i64,
        args: Args,
    ) -> Result<ResultSet<FluidCallCredential>, RingPlusError> {
        self.list(&endpoints::FLUID_CALL_CREDENTIALS, args.prepend(account_id))
            .await
    }

    // Usage

    /// Lists phone calls of an account. Accepts `start_date`, `end_date`,
    /// `page` and `per_page`.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn calls(&self, account_id: i64, args: Args) -> Result<ResultSet<Call>, RingPlusError> {
        self.list(&endpoints::CALLS, args.prepend(account_id)).await
    }

    /// Lists text messages of an account. Accepts the same filters as
    /// [`calls`](Self::calls).
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn texts(&self, account_id: i64, args: Args) -> Result<ResultSet<Text>, RingPlusError> {
        self.list(&endpoints::TEXTS, args.prepend(account_id)).await
    }

    /// Lists data usage of an account. Accepts the same filters as
    /// [`calls`](Self::calls).
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn data(&self, account_id: i64, args: Args) -> Result<ResultSet<Data>, RingPlusError> {
        self.list(&endpoints::DATA, args.prepend(account_id)).await
    }

    // Users

    /// Fetches one user with their accounts.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn get_user(&self, user_id: i64) -> Result<User, RingPlusError> {
        self.model(&endpoints::GET_USER, Args::new().arg(user_id)).await
    }

    /// Lists every user the token has access to. Accepts `email_address`,
    /// `page` and `per_page`.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn users(&self, args: Args) -> Result<ResultSet<User>, RingPlusError> {
        self.list(&endpoints::USERS, args).await
    }

    /// Updates a user. Accepts `email` and `password`.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn update_user(&self, user_id: i64, args: Args) -> Result<(), RingPlusError> {
        self.execute(&endpoints::UPDATE_USER, args.prepend(user_id))
            .await
            .map(drop)
    }

    // Voicemail

    /// Lists the messages in a voicemail box. Accepts `only_new`, `page` and
    /// `per_page`.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn voicemail(
        &self,
        voicemail_box_id: i64,
        args: Args,
    ) -> Result<ResultSet<Voicemail>, RingPlusError> {
        self.list(&endpoints::VOICEMAIL, args.prepend(voicemail_box_id)).await
    }

    /// Deletes a voicemail message.
    ///
    /// # Errors
    ///
    /// Returns a [`RingPlusError`] if the call fails.
    pub async fn delete_voicemail(&self, voicemail_message_id: i64) -> Result<(), RingPlusError> {
        self.execute(&endpoints::DELETE_VOICEMAIL, Args::new().arg(voicemail_message_id))
            .await
            .map(drop)
    }
}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("base_url", &self.config().base_url())
            .field("auth", self.auth())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use crate::rest::{ArgumentError, Model};

    fn api() -> Api {
        Api::new(Arc::new(StaticToken::new("t")), RingPlusConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_id_supplied_twice_is_rejected_before_io() {
        let err = api()
            .calls(1, Args::new().param("account_id", 2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RingPlusError::Argument(ArgumentError::Duplicate { ref name }) if name == "account_id"
        ));
    }

    #[tokio::test]
    async fn test_unknown_filter_is_rejected_before_io() {
        let err = api()
            .users(Args::new().param("colour", "red"))
            .await
            .unwrap_err();
        assert!(matches!(err, RingPlusError::Argument(ArgumentError::Unrecognized { .. })));
    }

    #[test]
    fn test_entities_outlive_client_detached() {
        let api = api();
        let api_ref = ApiRef::new(&api.inner);
        assert!(api_ref.is_attached());
        drop(api);
        assert!(!api_ref.is_attached());

        let account = Account::parse(&api_ref, &serde_json::json!({"id": 1})).unwrap();
        assert!(account.api().upgrade().is_none());
    }

    #[test]
    fn test_debug_shows_base_url_not_token() {
        let debug = format!("{:?}", api());
        assert!(debug.contains("https://api.ringplus.net/v1"));
        assert!(debug.contains("StaticToken(*****)"));
    }
}
