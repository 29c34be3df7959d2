//! Lenient deserializers applied to incoming request bodies.
//!
//! Text fields accept any scalar and store its string form, list fields accept
//! a bare value as a one-element list, and dates accept RFC 3339 strings,
//! plain `YYYY-MM-DD` dates or epoch milliseconds. Anything else is rejected.
//!
//! Request-side helpers yield `Option<Option<T>>`: the outer `None` (via
//! `#[serde(default)]`) means the field was absent, `Some(None)` an explicit
//! `null`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, de::Error};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
            Scalar::Flag(flag) => flag.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Scalar>),
    One(Scalar),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Text(String),
    Millis(i64),
}

pub fn string<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(
        Option::<Scalar>::deserialize(deserializer)?.map(String::from),
    ))
}

pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Option<Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<OneOrMany>::deserialize(deserializer)?.map(
        |value| match value {
            OneOrMany::Many(items) => items.into_iter().map(String::from).collect(),
            OneOrMany::One(item) => vec![String::from(item)],
        },
    )))
}

/// Untyped list: an array is kept as is, any other value is wrapped.
pub fn value_list<'de, D>(deserializer: D) -> Result<Option<Option<Vec<Value>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<Value>::deserialize(deserializer)?.map(
        |value| match value {
            Value::Array(items) => items,
            other => vec![other],
        },
    )))
}

pub fn date<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Timestamp>::deserialize(deserializer)? {
        None => None,
        Some(Timestamp::Millis(millis)) => Some(
            DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| D::Error::custom(format!("timestamp {} is out of range", millis)))?,
        ),
        Some(Timestamp::Text(text)) => Some(
            parse_date(&text)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {:?}", text)))?,
        ),
    };
    Ok(Some(parsed))
}

/// Any other value that may be sent as `null`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Stored-side helper: a `null` list reads back as empty.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}
