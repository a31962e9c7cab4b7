//! Request binding and model parsing for the RingPlus REST API.
//!
//! This module holds the two halves every API call goes through:
//!
//! - **Binding**: an [`Endpoint`] is a `const` description of one operation
//!   (path template, method, allowed parameters, payload type, post
//!   container). [`Binder::execute`] validates [`Args`] against it, sends the
//!   request with the bearer token and interprets the response.
//! - **Parsing**: the [`ModelFactory`] maps each [`ModelKind`] to a
//!   [`ModelParser`] that turns JSON into typed entities (see
//!   [`resources`]), preserving the raw JSON and every unknown key.
//!
//! # Key Types
//!
//! - [`Endpoint`], [`Args`]: declarative endpoints and call-time arguments
//! - [`Binder`]: the generic executor
//! - [`Payload`]: the untyped result of an execution
//! - [`Model`], [`ApiRef`]: the entity trait and its client back-reference
//! - [`ResultSet`]: an ordered list of entities with `max_id`/`since_id` cursors
//! - [`ResponseCache`], [`MemoryCache`]: the optional GET response cache
//! - [`RingPlusError`]: the single error type of every call
//!
//! # Example: a custom endpoint
//!
//! ```rust,ignore
//! use ringplus::rest::{Args, Endpoint, ModelKind, PayloadType};
//! use ringplus::Account;
//!
//! const SEARCH: Endpoint = Endpoint::get("/accounts")
//!     .payload(PayloadType::Model(ModelKind::Account))
//!     .list()
//!     .allowed_param(&["phone_number"]);
//!
//! let accounts = api
//!     .execute(&SEARCH, Args::new().param("phone_number", "5551234567"))
//!     .await?
//!     .into_list::<Account>()?;
//! ```

mod binder;
mod cache;
mod endpoint;
mod errors;
mod factory;
pub mod fields;
mod model;
mod path;
pub mod resources;
mod response;
mod result_set;

pub use binder::Binder;
pub use cache::{MemoryCache, ResponseCache};
pub use endpoint::{Args, BoundCall, Endpoint};
pub use errors::{
    is_rate_limit_body, ApiError, ArgumentError, ParseError, RingPlusError, RATE_LIMIT_CODE,
};
pub use factory::{DefaultParser, Entity, ModelFactory, ModelKind, ModelParser, PayloadType};
pub use model::{ApiRef, Model};
pub use path::{build_path, placeholders};
pub use response::Payload;
pub use result_set::{Identified, ResultSet};
