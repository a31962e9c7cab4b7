//! # RingPlus API Rust SDK
//!
//! An async client for the RingPlus REST API: accounts, users, call, text
//! and data usage, voicemail, device and phone-number changes, account
//! registration, enforced carrier services and FluidCall credentials.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`RingPlusConfig`] and [`RingPlusConfigBuilder`]
//! - Validated newtypes for credentials and hosts
//! - OAuth 2.0 authorization-code and refresh-token flows via [`auth`]
//! - A typed method per endpoint on [`Api`], backed by declarative
//!   [`Endpoint`](rest::Endpoint) constants in [`api::endpoints`]
//! - Typed entities ([`Account`], [`User`], [`Call`], ...) that keep the raw
//!   JSON and every field they do not name
//! - Fixed-delay retries for GET requests and optional rate-limit waiting
//! - A pluggable response cache and model parsers
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use ringplus::{ApiVersion, RingPlusConfig};
//!
//! let config = RingPlusConfig::builder()
//!     .api_version(ApiVersion::latest())
//!     .timeout(Duration::from_secs(30))
//!     .retry_count(2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://api.ringplus.net/v1");
//! ```
//!
//! ## Making Calls
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ringplus::{Api, Args, RingPlusConfig};
//! use ringplus::auth::StaticToken;
//!
//! let api = Api::new(Arc::new(StaticToken::new("access-token")), RingPlusConfig::default())?;
//!
//! for account in api.accounts(Args::new().param("per_page", 25)).await? {
//!     println!("{:?} {:?}", account.name, account.phone_number);
//!
//!     // Follow-up calls go through the client that fetched the entity
//!     let texts = account.texts(Args::new()).await?;
//!     println!("  {} texts", texts.len());
//! }
//! ```
//!
//! ## OAuth Authentication
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ringplus::auth::OAuthHandler;
//! use ringplus::{Api, ClientId, ClientSecret, RedirectUri, RingPlusConfig};
//!
//! let handler = Arc::new(OAuthHandler::new(
//!     ClientId::new("your-client-id")?,
//!     ClientSecret::new("your-client-secret")?,
//!     RedirectUri::new("https://your-app.com/callback")?,
//! ));
//!
//! // Step 1: redirect the user
//! let url = handler.authorization_url();
//!
//! // Step 2: exchange the redirect they come back with
//! handler.fetch_token_from_redirect(&redirect_url).await?;
//!
//! // Step 3: the handler now supplies the token for every call
//! let api = Api::new(handler.clone(), RingPlusConfig::default())?;
//! let user = api.get_user(7).await?;
//! ```
//!
//! ## Errors
//!
//! Every call returns [`RingPlusError`]; see [`rest`] for the variants.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Arguments are checked before any network I/O
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **Immutable entities**: Entities are snapshots and are never mutated

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use api::Api;
pub use config::{
    ApiVersion, ClientId, ClientSecret, HostUrl, RedirectUri, RingPlusConfig,
    RingPlusConfigBuilder,
};
pub use error::ConfigError;

// Re-export the binder surface
pub use rest::{Args, Payload, ResultSet, RingPlusError};

// Re-export entity types
pub use rest::resources::{
    Account, AccountService, ActiveDevice, Call, CarrierService, Data, FluidCallCredential,
    Request, Text, User, Voicemail, VoicemailBox,
};

// Re-export auth types for convenience
pub use auth::{AccessToken, AuthError, OAuthHandler, StaticToken, TokenProvider};
