//! Carrier services enforced on an account.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::{fields, ApiRef};

/// A carrier-level service RingPlus enforces on an account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierService {
    /// The unique identifier of the service.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The service name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    /// Keys not surfaced as fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(CarrierService);
