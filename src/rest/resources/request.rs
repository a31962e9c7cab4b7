//! Asynchronous change requests.
//!
//! Account registration, device changes and phone number changes are
//! processed by RingPlus in the background. Submitting one returns a
//! [`Request`] whose `status` can be polled through the matching
//! `*_status` call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::{fields, ApiRef};

/// A background change request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// The unique identifier of the request.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Processing state, e.g. `pending`, `completed`, `failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,

    /// When the request was submitted.
    #[serde(default, deserialize_with = "fields::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    /// When the request last changed state.
    #[serde(default, deserialize_with = "fields::timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,

    /// Keys not surfaced as fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(Request);

impl Request {
    /// Returns `true` once the server reports a terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status.as_ref().and_then(Value::as_str),
            Some("completed" | "complete" | "failed" | "rejected" | "cancelled")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::Model;
    use serde_json::json;

    #[test]
    fn test_request_status() {
        let request = Request::parse(
            &ApiRef::detached(),
            &json!({"request": {"id": "55", "status": "pending", "created_on": "2016-01-02T03:04:05Z"}}),
        )
        .unwrap();
        assert_eq!(request.id, Some(55));
        assert!(!request.is_finished());
        assert!(request.created_on.is_some());
        assert!(request.updated_on.is_none());
    }

    #[test]
    fn test_numeric_status_is_kept_but_not_finished() {
        let request = Request::parse(&ApiRef::detached(), &json!({"id": 56, "status": 2})).unwrap();
        assert_eq!(request.status, Some(json!(2)));
        assert!(!request.is_finished());

        let request =
            Request::parse(&ApiRef::detached(), &json!({"id": 57, "status": "completed"})).unwrap();
        assert!(request.is_finished());
    }
}
