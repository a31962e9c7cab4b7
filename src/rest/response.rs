//! The result of a binder invocation.
//!
//! The binder does not know which Rust type an endpoint returns; it produces
//! a [`Payload`] shaped by the endpoint's declared payload type. The typed
//! methods on [`Api`](crate::Api) then convert it with one of the `into_*`
//! methods.
//!
//! # Example
//!
//! ```rust,ignore
//! use ringplus::api::endpoints::GET_ACCOUNT;
//! use ringplus::rest::Args;
//! use ringplus::Account;
//!
//! let payload = api.execute(&GET_ACCOUNT, Args::new().arg(12)).await?;
//! let account: Account = payload.into_model()?;
//! ```

use serde_json::Value;

use crate::rest::errors::ParseError;
use crate::rest::factory::Entity;
use crate::rest::model::Model;
use crate::rest::result_set::ResultSet;

/// A parsed response body.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// The server returned no content.
    Empty,
    /// Decoded JSON, for endpoints without a model payload.
    Json(Value),
    /// A list of ids.
    Ids(Vec<Value>),
    /// A single entity.
    Model(Entity),
    /// An ordered list of entities.
    List(ResultSet<Entity>),
}

impl Payload {
    /// Returns the variant name, for error messages.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Json(_) => "json",
            Self::Ids(_) => "ids",
            Self::Model(_) => "model",
            Self::List(_) => "list",
        }
    }

    /// Converts a single-entity payload into a concrete model.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the payload is not a single entity of
    /// type `T`.
    pub fn into_model<T: Model>(self) -> Result<T, ParseError> {
        match self {
            Self::Model(entity) => entity.into_model(),
            other => Err(Self::mismatch::<T>(&other, "a single entity")),
        }
    }

    /// Converts a list payload into a typed result set, keeping order and
    /// cursor overrides.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the payload is not a list of `T`.
    pub fn into_list<T: Model>(self) -> Result<ResultSet<T>, ParseError> {
        match self {
            Self::List(entities) => entities.try_map(Entity::into_model),
            other => Err(Self::mismatch::<T>(&other, "a list")),
        }
    }

    /// Returns the decoded JSON, re-serializing entities from their raw JSON.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Json(value) => value,
            Self::Ids(ids) => Value::Array(ids),
            Self::Model(entity) => entity.raw().clone(),
            Self::List(entities) => {
                Value::Array(entities.iter().map(|e| e.raw().clone()).collect())
            }
        }
    }

    /// Returns the ids of an ids payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for any other shape.
    pub fn into_ids(self) -> Result<Vec<Value>, ParseError> {
        match self {
            Self::Ids(ids) => Ok(ids),
            other => Err(ParseError::new(
                "ids",
                format!("expected an ids payload, got {}", other.shape()),
            )),
        }
    }

    fn mismatch<T: Model>(payload: &Self, expected: &str) -> ParseError {
        ParseError::new(
            T::KIND.name(),
            format!("expected {expected}, got a {} payload", payload.shape()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::resources::{Account, User};
    use crate::rest::{ApiRef, ModelKind};
    use serde_json::json;

    fn account_list() -> Payload {
        let list = ModelKind::Account
            .default_parser()
            .parse_list(&ApiRef::detached(), &json!([{"id": 2}, {"id": 4}]))
            .unwrap();
        Payload::List(list)
    }

    #[test]
    fn test_into_list_keeps_order() {
        let accounts = account_list().into_list::<Account>().unwrap();
        assert_eq!(accounts.ids(), vec![2, 4]);
        assert_eq!(accounts.max_id(), Some(1));
    }

    #[test]
    fn test_into_list_rejects_other_kinds() {
        let err = account_list().into_list::<User>().unwrap_err();
        assert_eq!(err.payload, "user");
    }

    #[test]
    fn test_into_model_rejects_list() {
        let err = account_list().into_model::<Account>().unwrap_err();
        assert!(err.reason.contains("got a list payload"));
    }

    #[test]
    fn test_into_json_uses_raw() {
        assert_eq!(account_list().into_json(), json!([{"id": 2}, {"id": 4}]));
        assert_eq!(Payload::Empty.into_json(), Value::Null);
    }

    #[test]
    fn test_into_ids() {
        let ids = Payload::Ids(vec![json!(1), json!(2)]).into_ids().unwrap();
        assert_eq!(ids.len(), 2);
        assert!(Payload::Empty.into_ids().is_err());
    }
}
