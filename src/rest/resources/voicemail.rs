//! Voicemail boxes and messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::follow_up;
use crate::rest::errors::RingPlusError;
use crate::rest::{fields, ApiRef, Args, ResultSet};

/// An account's voicemail box.
///
/// Only the id is typed; the remaining mailbox settings are in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VoicemailBox {
    /// The unique identifier of the mailbox.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Mailbox metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(VoicemailBox);

impl VoicemailBox {
    /// Fetches a page of messages in this mailbox.
    ///
    /// # Errors
    ///
    /// Returns [`RingPlusError::Detached`] if the mailbox was not fetched
    /// through a live client, or any error of the underlying call.
    pub async fn messages(&self, args: Args) -> Result<ResultSet<Voicemail>, RingPlusError> {
        let (api, id) = follow_up(self, "voicemail_box_id")?;
        api.voicemail(id, args).await
    }
}

/// A voicemail message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Voicemail {
    /// The unique identifier of the message.
    #[serde(default, deserialize_with = "fields::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// When the message was left.
    #[serde(default, deserialize_with = "fields::timestamp", skip_serializing_if = "Option::is_none")]
    pub received_on: Option<DateTime<Utc>>,

    /// Machine transcription of the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<Value>,

    /// Where the audio can be downloaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<Value>,

    /// Whether the message is unheard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,

    /// Keys not surfaced as fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    raw: Value,

    #[serde(skip)]
    api: ApiRef,
}

impl_model!(Voicemail);

impl Voicemail {
    /// Returns `true` if the server flags the message as unheard.
    ///
    /// Accepts `true`, a non-zero number or the strings `"true"` and `"1"`.
    #[must_use]
    pub fn is_new(&self) -> bool {
        match &self.new {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => matches!(s.as_str(), "true" | "1"),
            _ => false,
        }
    }

    /// Deletes this message on the server.
    ///
    /// # Errors
    ///
    /// Returns [`RingPlusError::Detached`] if the message was not fetched
    /// through a live client, or any error of the underlying call.
    pub async fn delete(&self) -> Result<(), RingPlusError> {
        let (api, id) = follow_up(self, "voicemail_message_id")?;
        api.delete_voicemail(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::Model;
    use serde_json::json;

    #[test]
    fn test_voicemail_messages() {
        let messages = Voicemail::parse_list(
            &ApiRef::detached(),
            &json!({"voicemail_messages": [{
                "id": 7,
                "received_on": "2016-05-05T05:05:05Z",
                "transcription": "Call me back",
                "audio_url": "https://example.com/7.mp3",
                "new": true,
                "duration": 12
            }]}),
        )
        .unwrap();

        let message = &messages[0];
        assert_eq!(message.transcription, Some(json!("Call me back")));
        assert!(message.is_new());
        assert!(message.received_on.is_some());
        assert_eq!(message.extra.get("duration"), Some(&json!(12)));
    }

    #[test]
    fn test_new_flag_accepts_loose_types() {
        let messages = Voicemail::parse_list(
            &ApiRef::detached(),
            &json!([
                {"id": 3, "new": 1, "transcription": null},
                {"id": 2, "new": "false"},
                {"id": 1, "new": 0.0, "audio_url": 42}
            ]),
        )
        .unwrap();

        assert!(messages[0].is_new());
        assert!(!messages[1].is_new());
        assert!(!messages[2].is_new());
        assert_eq!(messages[2].audio_url, Some(json!(42)));
        assert_eq!(messages[0].transcription, None);
    }

    #[test]
    fn test_voicemail_box_keeps_metadata() {
        let mailbox = VoicemailBox::parse(
            &ApiRef::detached(),
            &json!({"voicemail_box": {"id": 3, "greeting": "default", "pin_set": false}}),
        )
        .unwrap();
        assert_eq!(mailbox.id, Some(3));
        assert_eq!(mailbox.extra.len(), 2);
    }
}
