//! User resource.
//!
//! A [`User`] owns one or more accounts. User payloads embed the accounts,
//! each parsed as a full [`Account`] including its own nested entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{follow_up, Account};
use crate::rest::errors::RingPlusError;
use crate::rest::{fields, ApiRef, Args, ResultSet};

/// A RingPlus user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The unique identifier of the user.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The user's login email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,

    /// When the user registered.
    #[serde(default, deserialize_with = "fields::timestamp", skip_serializing_if = "Option::is_none")]
    pub registered_on: Option<DateTime<Utc>>,

    /// The user's accounts, in server order.
    #[serde(default, deserialize_with = "fields::nested_list", skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<Account>,

    /// Keys not surfaced as fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(User, lists: [accounts]);

impl User {
    /// Fetches a page of this user's accounts from the server.
    ///
    /// Unlike [`User::accounts`], which holds whatever the user payload
    /// embedded, this accepts the filter and paging parameters of
    /// [`Api::user_accounts`](crate::Api::user_accounts).
    ///
    /// # Errors
    ///
    /// Returns [`RingPlusError::Detached`] if the user was not fetched through
    /// a live client, or any error of the underlying call.
    pub async fn accounts_page(&self, args: Args) -> Result<ResultSet<Account>, RingPlusError> {
        let (api, id) = follow_up(self, "user_id")?;
        api.user_accounts(id, args).await
    }
}
