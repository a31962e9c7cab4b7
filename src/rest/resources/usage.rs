//! Usage records: phone calls, text messages and data sessions.
//!
//! Returned page by page from `/accounts/{account_id}/phone_calls`,
//! `/phone_texts` and `/phone_data`. Costs and sizes are kept exactly as the
//! server sends them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::{fields, ApiRef};

/// A phone call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// The unique identifier of the call record.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// When the call started.
    #[serde(default, deserialize_with = "fields::timestamp", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    /// `incoming` or `outgoing`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Value>,

    /// The calling number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originating_phone_number: Option<Value>,

    /// The called number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_phone_number: Option<Value>,

    /// Call duration, as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,

    /// Charged cost, as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Value>,

    /// Keys not surfaced as fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(Call);

/// A text message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// The unique identifier of the text record.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// When the message was sent or received.
    #[serde(default, deserialize_with = "fields::timestamp", skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,

    /// `incoming` or `outgoing`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Value>,

    /// The sending number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originating_phone_number: Option<Value>,

    /// The receiving number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_phone_number: Option<Value>,

    /// Charged cost, as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Value>,

    /// Keys not surfaced as fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(Text);

/// A data session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Data {
    /// The unique identifier of the data record.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// When the session took place.
    #[serde(default, deserialize_with = "fields::timestamp", skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,

    /// Volume used, as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilobytes: Option<Value>,

    /// Charged cost, as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Value>,

    /// Keys not surfaced as fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(Data);
