// src/models/user.rs

use bson::{Bson, Document, doc, oid::ObjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::put;
use crate::{db::Model, utils::coerce};

/// Represents a document of the 'users' collection.
///
/// Every field is optional. `password` is stored exactly as submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "coerce::null_as_default")]
    pub quiz_history: Vec<Bson>,
    pub registration_date: Option<bson::DateTime>,
}

impl Model for User {
    const COLLECTION: &'static str = "users";

    fn defaults() -> Document {
        doc! { "quizHistory": [] }
    }
}

/// Request body for creating or updating a user.
///
/// Unknown fields are dropped. Each field is `None` when absent and
/// `Some(None)` when sent as `null`, which clears it on update.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default, deserialize_with = "coerce::string")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::string")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::string")]
    #[schema(value_type = Option<String>)]
    pub password: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::string")]
    #[schema(value_type = Option<String>)]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::value_list")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub quiz_history: Option<Option<Vec<serde_json::Value>>>,
    #[serde(default, deserialize_with = "coerce::date")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub registration_date: Option<Option<DateTime<Utc>>>,
}

impl UserInput {
    /// The supplied fields as a document, ready for insertion or `$set`.
    pub fn into_document(self) -> Result<Document, bson::ser::Error> {
        let quiz_history = self
            .quiz_history
            .map(|history| history.map(|entries| bson::to_bson(&entries)).transpose())
            .transpose()?;

        let mut document = Document::new();
        put(&mut document, "name", self.name);
        put(&mut document, "email", self.email);
        put(&mut document, "password", self.password);
        put(&mut document, "role", self.role);
        put(&mut document, "quizHistory", quiz_history);
        put(
            &mut document,
            "registrationDate",
            self.registration_date
                .map(|date| date.map(super::to_bson_date)),
        );

        Ok(document)
    }
}

/// User as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[schema(value_type = Vec<Object>)]
    pub quiz_history: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            email: user.email,
            password: user.password,
            role: user.role,
            quiz_history: user
                .quiz_history
                .into_iter()
                .map(Bson::into_relaxed_extjson)
                .collect(),
            registration_date: user.registration_date.map(super::from_bson_date),
        }
    }
}
