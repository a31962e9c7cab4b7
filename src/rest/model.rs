//! The [`Model`] trait shared by every entity, and the [`ApiRef`]
//! back-reference entities use for follow-up calls.
//!
//! Entities are plain serde structs with explicit optional fields. Keys the
//! struct does not name are kept in an `extra` map, and the JSON object the
//! entity was built from is kept verbatim, so nothing the server sends is
//! lost.

use std::fmt;
use std::sync::{Arc, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::{Api, ApiInner};
use crate::rest::errors::ParseError;
use crate::rest::factory::{Entity, ModelFactory, ModelKind};
use crate::rest::result_set::{Identified, ResultSet};

/// A non-owning handle to the client that fetched an entity.
///
/// The handle never keeps the client alive. It is skipped by serde and is
/// ignored by equality, so two entities parsed from the same JSON compare
/// equal whichever client (if any) they came from.
#[derive(Clone, Default)]
pub struct ApiRef(Option<Weak<ApiInner>>);

impl ApiRef {
    /// A handle that is not connected to any client.
    #[must_use]
    pub const fn detached() -> Self {
        Self(None)
    }

    pub(crate) fn new(inner: &Arc<ApiInner>) -> Self {
        Self(Some(Arc::downgrade(inner)))
    }

    /// Returns the client, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Api> {
        self.0
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Api::from_inner)
    }

    /// Returns `true` if the handle points at a live client.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.0.as_ref().is_some_and(|weak| weak.strong_count() > 0)
    }
}

impl PartialEq for ApiRef {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Debug for ApiRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_attached() {
            f.write_str("ApiRef(attached)")
        } else {
            f.write_str("ApiRef(detached)")
        }
    }
}

/// Behavior shared by every RingPlus entity.
///
/// Implementors only provide accessors; [`parse`](Self::parse) and
/// [`parse_list`](Self::parse_list) are derived from the kind's envelope and
/// collection keys.
pub trait Model:
    Identified + DeserializeOwned + Serialize + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// The kind this type is registered under in the model factory.
    const KIND: ModelKind;

    /// The JSON object this entity was parsed from.
    fn raw(&self) -> &Value;

    /// Keys the entity does not surface as typed fields.
    fn extra(&self) -> &Map<String, Value>;

    /// The back-reference to the client that fetched this entity.
    fn api(&self) -> &ApiRef;

    /// Stores the source JSON.
    fn set_raw(&mut self, raw: Value);

    /// Sets the back-reference on this entity and every nested entity.
    fn attach(&mut self, api: &ApiRef);

    /// Re-parses every nested entity through `factory`, so parsers
    /// registered for nested kinds apply at every depth.
    ///
    /// Nested values are read back from [`raw`](Self::raw); an entity with no
    /// raw object is left as it is.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] a nested parser reports.
    fn resolve_nested(&mut self, factory: &ModelFactory, api: &ApiRef) -> Result<(), ParseError>;

    /// Wraps the entity for the factory.
    fn into_entity(self) -> Entity;

    /// Unwraps a factory entity of this kind.
    fn from_entity(entity: Entity) -> Option<Self>;

    /// Parses one entity.
    ///
    /// If the object has a key equal to the kind's name whose value is an
    /// object (`{"account": {...}}`), that inner object is parsed instead,
    /// repeatedly until no such envelope is left.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the JSON is not an object or a typed field
    /// has the wrong shape.
    fn parse(api: &ApiRef, json: &Value) -> Result<Self, ParseError> {
        let name = Self::KIND.name();
        let mut object = json;
        while let Some(inner) = object.get(name).filter(|inner| inner.is_object()) {
            object = inner;
        }
        if !object.is_object() {
            return Err(ParseError::new(
                name,
                format!("expected a JSON object, got {}", json_type(object)),
            ));
        }

        let mut model =
            Self::deserialize(object).map_err(|e| ParseError::new(name, e.to_string()))?;
        model.set_raw(object.clone());
        model.attach(api);
        Ok(model)
    }

    /// Parses a list of entities from a bare array or from an object keyed
    /// by the kind's collection name (`{"accounts": [...]}`).
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the kind if the JSON is neither shape,
    /// or if any element fails to parse.
    fn parse_list(api: &ApiRef, json: &Value) -> Result<ResultSet<Self>, ParseError> {
        let collection = Self::KIND.collection();
        let items = match json {
            Value::Array(items) => items,
            Value::Object(map) => match map.get(collection) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(ParseError::new(
                        Self::KIND.name(),
                        format!("expected a list or an object with a '{collection}' list"),
                    ))
                }
            },
            other => {
                return Err(ParseError::new(
                    Self::KIND.name(),
                    format!("expected a list, got {}", json_type(other)),
                ))
            }
        };

        items
            .iter()
            .map(|item| Self::parse(api, item))
            .collect::<Result<Vec<_>, _>>()
            .map(ResultSet::new)
    }
}

pub(crate) const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::resources::Account;
    use serde_json::json;

    #[test]
    fn test_detached_ref_has_no_client() {
        let api = ApiRef::detached();
        assert!(!api.is_attached());
        assert!(api.upgrade().is_none());
        assert_eq!(format!("{api:?}"), "ApiRef(detached)");
    }

    #[test]
    fn test_api_refs_always_compare_equal() {
        assert_eq!(ApiRef::detached(), ApiRef::default());
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        let err = Account::parse(&ApiRef::detached(), &json!([1, 2])).unwrap_err();
        assert_eq!(err.payload, "account");
        assert!(err.reason.contains("a list"));
    }

    #[test]
    fn test_parse_list_rejects_wrong_collection_key() {
        let err = Account::parse_list(&ApiRef::detached(), &json!({"users": []})).unwrap_err();
        assert_eq!(err.payload, "account");
        assert!(err.reason.contains("'accounts'"));

        let err = Account::parse_list(&ApiRef::detached(), &json!("nope")).unwrap_err();
        assert!(err.reason.contains("a string"));
    }

    #[test]
    fn test_nested_envelopes_are_all_unwrapped() {
        let account = Account::parse(
            &ApiRef::detached(),
            &json!({"account": {"account": {"id": 3, "name": "Home"}}}),
        )
        .unwrap();
        assert_eq!(account.id, Some(3));
        assert!(account.extra().is_empty());
        assert_eq!(account.raw(), &json!({"id": 3, "name": "Home"}));
    }

    #[test]
    fn test_envelope_only_unwraps_objects() {
        // A scalar under the kind's own name is an ordinary field.
        let account = Account::parse(&ApiRef::detached(), &json!({"id": 1, "account": "x"})).unwrap();
        assert_eq!(account.id, Some(1));
        assert_eq!(account.extra().get("account"), Some(&json!("x")));
    }
}
