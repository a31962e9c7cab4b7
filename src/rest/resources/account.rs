//! Account resource and the entities nested inside it.
//!
//! An [`Account`] is one phone line on a plan. Detailed account payloads embed
//! the add-on services, the active device and the voicemail box:
//!
//! ```json
//! {
//!   "account": {
//!     "id": 12,
//!     "name": "Steve",
//!     "phone_number": "5551234567",
//!     "registered_on": "2016-01-01T00:00:00Z",
//!     "account_services": [{"id": 1, "name": "Voicemail"}],
//!     "active_device": {"model_name": "Galaxy S4", "esn": "2684..."},
//!     "voicemail_box": {"id": 88}
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let account = api.get_account(12).await?;
//! if let Some(device) = &account.active_device {
//!     println!("{:?}", device.model_name);
//! }
//! let calls = account.calls(Args::new().param("per_page", 50)).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{follow_up, Call, Data, Text, Voicemail, VoicemailBox};
use crate::rest::errors::{ArgumentError, RingPlusError};
use crate::rest::{fields, ApiRef, Args, ResultSet};

/// A phone line on a RingPlus plan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The unique identifier of the account.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The account's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    /// The current balance, as sent by the server (number or string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Value>,

    /// The phone number assigned to the account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Value>,

    /// When the account was registered.
    #[serde(default, deserialize_with = "fields::timestamp", skip_serializing_if = "Option::is_none")]
    pub registered_on: Option<DateTime<Utc>>,

    /// The owning user.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Add-on services, in server order.
    #[serde(default, deserialize_with = "fields::nested_list", skip_serializing_if = "Vec::is_empty")]
    pub account_services: Vec<AccountService>,

    /// The device currently active on the account.
    #[serde(default, deserialize_with = "fields::nested", skip_serializing_if = "Option::is_none")]
    pub active_device: Option<ActiveDevice>,

    /// The account's voicemail box.
    #[serde(default, deserialize_with = "fields::nested", skip_serializing_if = "Option::is_none")]
    pub voicemail_box: Option<VoicemailBox>,

    /// Keys not surfaced as fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(Account, nested: [active_device, voicemail_box], lists: [account_services]);

impl Account {
    /// Re-fetches this account.
    ///
    /// # Errors
    ///
    /// Returns [`RingPlusError::Detached`] if the account was not fetched
    /// through a live client, or any error of the underlying call.
    pub async fn refresh(&self) -> Result<Self, RingPlusError> {
        let (api, id) = follow_up(self, "account_id")?;
        api.get_account(id).await
    }

    /// Fetches a page of this account's phone calls.
    ///
    /// # Errors
    ///
    /// See [`Account::refresh`].
    pub async fn calls(&self, args: Args) -> Result<ResultSet<Call>, RingPlusError> {
        let (api, id) = follow_up(self, "account_id")?;
        api.calls(id, args).await
    }

    /// Fetches a page of this account's text messages.
    ///
    /// # Errors
    ///
    /// See [`Account::refresh`].
    pub async fn texts(&self, args: Args) -> Result<ResultSet<Text>, RingPlusError> {
        let (api, id) = follow_up(self, "account_id")?;
        api.texts(id, args).await
    }

    /// Fetches a page of this account's data usage.
    ///
    /// # Errors
    ///
    /// See [`Account::refresh`].
    pub async fn data(&self, args: Args) -> Result<ResultSet<Data>, RingPlusError> {
        let (api, id) = follow_up(self, "account_id")?;
        api.data(id, args).await
    }

    /// Fetches a page of messages from this account's voicemail box.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Missing`] if the account has no voicemail box
    /// id, otherwise see [`Account::refresh`].
    pub async fn voicemail(&self, args: Args) -> Result<ResultSet<Voicemail>, RingPlusError> {
        let (api, _) = follow_up(self, "account_id")?;
        let box_id = self
            .voicemail_box
            .as_ref()
            .and_then(|mailbox| mailbox.id)
            .ok_or_else(|| ArgumentError::Missing {
                endpoint: "account",
                name: "voicemail_box_id".to_string(),
            })?;
        api.voicemail(box_id, args).await
    }
}

/// An add-on service attached to an account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountService {
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

impl_model!(AccountService);

/// The handset currently registered to an account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveDevice {
    /// The device id, when the server sends one.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The handset model, e.g. `Galaxy S4`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<Value>,

    /// Electronic serial number (CDMA devices).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esn: Option<Value>,

    /// SIM card identifier (GSM/LTE devices).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iccid: Option<Value>,

    /// When the device was registered to the account.
    #[serde(default, deserialize_with = "fields::timestamp", skip_serializing_if = "Option::is_none")]
    pub registered_on: Option<DateTime<Utc>>,

    /// Keys not surfaced as fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(ActiveDevice);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::Model;
    use chrono::TimeZone;
    use serde_json::json;

    fn detailed() -> Value {
        json!({
            "id": 12,
            "name": "Steve",
            "balance": "10.50",
            "phone_number": "5551234567",
            "registered_on": "2016-01-01T00:00:00Z",
            "user_id": 3,
            "account_services": [
                {"id": 2, "name": "Voicemail"},
                {"id": 1, "name": "Hotspot"}
            ],
            "active_device": {
                "model_name": "Galaxy S4",
                "esn": "268435459",
                "registered_on": "2016-02-01T12:00:00Z"
            },
            "voicemail_box": {"id": 88, "pin_set": true},
            "billing_plan": {"id": 9}
        })
    }

    #[test]
    fn test_account_parses_nested_entities() {
        let account = Account::parse(&ApiRef::detached(), &detailed()).unwrap();

        assert_eq!(account.id, Some(12));
        assert_eq!(account.name, Some(json!("Steve")));
        assert_eq!(account.balance, Some(json!("10.50")));
        assert_eq!(account.user_id, Some(3));

        let names: Vec<_> = account
            .account_services
            .iter()
            .map(|s| s.name.as_ref().and_then(Value::as_str).unwrap())
            .collect();
        assert_eq!(names, vec!["Voicemail", "Hotspot"]);

        let device = account.active_device.as_ref().unwrap();
        assert_eq!(device.model_name, Some(json!("Galaxy S4")));
        assert_eq!(
            device.registered_on,
            Some(Utc.with_ymd_and_hms(2016, 2, 1, 12, 0, 0).unwrap())
        );

        let mailbox = account.voicemail_box.as_ref().unwrap();
        assert_eq!(mailbox.id, Some(88));
        assert_eq!(mailbox.extra.get("pin_set"), Some(&json!(true)));
    }

    #[test]
    fn test_scalars_pass_through_whatever_type_the_server_sends() {
        let account = Account::parse(
            &ApiRef::detached(),
            &json!({
                "id": 12,
                "name": 1001,
                "phone_number": 5_551_234_567_i64,
                "account_services": [{"id": 2, "name": false}],
                "active_device": {"esn": 268_435_459, "iccid": ["89", "01"]}
            }),
        )
        .unwrap();

        assert_eq!(account.name, Some(json!(1001)));
        assert_eq!(account.phone_number, Some(json!(5_551_234_567_i64)));
        assert_eq!(account.account_services[0].name, Some(json!(false)));
        let device = account.active_device.as_ref().unwrap();
        assert_eq!(device.esn, Some(json!(268_435_459)));
        assert_eq!(device.iccid, Some(json!(["89", "01"])));
    }

    #[test]
    fn test_registered_on_is_a_timestamp() {
        let account = Account::parse(&ApiRef::detached(), &detailed()).unwrap();
        assert_eq!(
            account.registered_on,
            Some(Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_raw_and_extra_are_kept() {
        let json = detailed();
        let account = Account::parse(&ApiRef::detached(), &json).unwrap();
        assert_eq!(account.raw(), &json);
        assert_eq!(account.extra.get("billing_plan"), Some(&json!({"id": 9})));
        assert_eq!(
            account.active_device.as_ref().unwrap().raw(),
            &json["active_device"]
        );
    }

    #[test]
    fn test_wrapped_and_unwrapped_parse_identically() {
        let api = ApiRef::detached();
        let wrapped = Account::parse(&api, &json!({"account": detailed()})).unwrap();
        let bare = Account::parse(&api, &detailed()).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped.raw(), bare.raw());
    }

    #[test]
    fn test_null_nested_fields_are_absent() {
        let account = Account::parse(
            &ApiRef::detached(),
            &json!({"id": 1, "active_device": null, "account_services": null}),
        )
        .unwrap();
        assert!(account.active_device.is_none());
        assert!(account.account_services.is_empty());
    }

    #[test]
    fn test_bad_nested_shape_is_a_parse_error() {
        let err = Account::parse(&ApiRef::detached(), &json!({"active_device": "iPhone"}))
            .unwrap_err();
        assert_eq!(err.payload, "account");
        assert!(err.reason.contains("active_device"));
    }

    #[tokio::test]
    async fn test_follow_up_on_detached_account_fails() {
        let account = Account::parse(&ApiRef::detached(), &detailed()).unwrap();
        let err = account.refresh().await.unwrap_err();
        assert!(matches!(err, RingPlusError::Detached { model: "account" }));
    }
}
