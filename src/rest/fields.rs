//! Field deserializers shared by the entity structs.
//!
//! Used through `#[serde(default, deserialize_with = "...")]`; every helper
//! maps `null` and absent fields to the empty value.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

use crate::rest::model::{json_type, ApiRef, Model};

/// An id sent either as a number or as a numeric string.
pub fn id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("id {n} is not an integer"))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("id '{s}' is not an integer"))),
        Some(other) => Err(de::Error::custom(format!(
            "expected an id, got {}",
            json_type(&other)
        ))),
    }
}

/// A timestamp in RFC 3339 form, or one of the looser forms the API has been
/// seen to send (`2016-01-01 10:00:00`, `2016-01-01T10:00:00`, `2016-01-01`),
/// which are read as UTC.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_timestamp(s.trim())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{s}'"))),
    }
}

/// Parses the timestamp forms accepted by [`timestamp`].
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A single nested entity, parsed with the nested type's own
/// [`Model::parse`] so it keeps its raw JSON.
pub fn nested<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Model,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::parse(&ApiRef::detached(), &value)
            .map(Some)
            .map_err(de::Error::custom),
    }
}

/// A nested list of entities, in server order.
pub fn nested_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Model,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => T::parse_list(&ApiRef::detached(), &value)
            .map(crate::rest::ResultSet::into_vec)
            .map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2016-01-01T00:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2015-12-31T19:00:00-05:00"), Some(expected));
        assert_eq!(parse_timestamp("2016-01-01 00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2016-01-01T00:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2016-01-01"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "id")]
        id: Option<i64>,
        #[serde(default, deserialize_with = "timestamp")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_id_accepts_numbers_and_strings() {
        let row: Row = serde_json::from_str(r#"{"id": "42"}"#).unwrap();
        assert_eq!(row.id, Some(42));
        let row: Row = serde_json::from_str(r#"{"id": 7, "at": null}"#).unwrap();
        assert_eq!(row.id, Some(7));
        assert!(row.at.is_none());
        assert!(serde_json::from_str::<Row>(r#"{"id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"id": 1.5}"#).is_err());
    }

    #[test]
    fn test_invalid_timestamp_is_an_error() {
        assert!(serde_json::from_str::<Row>(r#"{"at": "not a date"}"#).is_err());
        let row: Row = serde_json::from_str(r#"{"at": ""}"#).unwrap();
        assert!(row.at.is_none());
    }
}
