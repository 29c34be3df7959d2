// src/models/mod.rs

pub mod question;
pub mod user;

use bson::{Bson, DateTime as BsonDateTime, Document};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

fn to_bson_date(date: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(date.timestamp_millis())
}

fn from_bson_date(date: BsonDateTime) -> DateTime<Utc> {
    date.to_chrono()
}

/// Copies a supplied request field into `document`. An explicit `null` is
/// written as `Bson::Null`; an absent field is left out.
fn put<T: Into<Bson>>(document: &mut Document, key: &str, field: Option<Option<T>>) {
    if let Some(value) = field {
        document.insert(key, value.map_or(Bson::Null, Into::into));
    }
}

/// Acknowledgement returned after a successful delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}
