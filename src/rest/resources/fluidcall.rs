//! FluidCall SIP credentials.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::{fields, ApiRef};

/// SIP credentials for placing FluidCall calls from an account.
///
/// The `Debug` implementation masks the password.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FluidCallCredential {
    /// The unique identifier of the credential.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// SIP username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<Value>,

    /// SIP password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Value>,

    /// SIP registrar host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sip_host: Option<Value>,

    /// Keys not surfaced as fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(FluidCallCredential);

impl fmt::Debug for FluidCallCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluidCallCredential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "*****"))
            .field("sip_host", &self.sip_host)
            .field("extra", &self.extra)
            .finish_non_exhaustive()
    }
}
