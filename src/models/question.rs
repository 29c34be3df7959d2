// src/models/question.rs

use bson::{Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::put;
use crate::{db::Model, utils::coerce};

/// The correct answer of a question: a single option index for single-select
/// questions or a list of indices for multi-select ones.
///
/// Either shape is accepted regardless of the question's `type`, and indices
/// are never checked against `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Correct {
    Single(i64),
    Multiple(Vec<i64>),
}

/// Represents a document of the 'questions' collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub branch: Option<String>,
    pub subject: Option<String>,
    pub question: Option<String>,
    #[serde(default, deserialize_with = "coerce::null_as_default")]
    pub options: Vec<String>,
    pub correct: Option<Correct>,
    /// Free-form discriminator such as "mcq" or "msq".
    /// Mapped from the field 'type' since `type` is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    pub explanation: Option<String>,
}

impl Model for Question {
    const COLLECTION: &'static str = "questions";

    fn defaults() -> Document {
        doc! { "options": [] }
    }
}

/// Request body for creating or updating a question.
/// Fields are `None` when absent and `Some(None)` when sent as `null`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct QuestionInput {
    #[serde(default, deserialize_with = "coerce::string")]
    #[schema(value_type = Option<String>)]
    pub branch: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::string")]
    #[schema(value_type = Option<String>)]
    pub subject: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::string")]
    #[schema(value_type = Option<String>)]
    pub question: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::string_list")]
    #[schema(value_type = Option<Vec<String>>)]
    pub options: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "coerce::nullable")]
    #[schema(value_type = Option<Correct>)]
    pub correct: Option<Option<Correct>>,
    #[serde(rename = "type", default, deserialize_with = "coerce::string")]
    #[schema(value_type = Option<String>)]
    pub question_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::string")]
    #[schema(value_type = Option<String>)]
    pub explanation: Option<Option<String>>,
}

impl QuestionInput {
    /// The supplied fields as a document, ready for insertion or `$set`.
    pub fn into_document(self) -> Result<Document, bson::ser::Error> {
        let correct = self
            .correct
            .map(|correct| correct.map(|value| bson::to_bson(&value)).transpose())
            .transpose()?;

        let mut document = Document::new();
        put(&mut document, "branch", self.branch);
        put(&mut document, "subject", self.subject);
        put(&mut document, "question", self.question);
        put(&mut document, "options", self.options);
        put(&mut document, "correct", correct);
        put(&mut document, "type", self.question_type);
        put(&mut document, "explanation", self.explanation);

        Ok(document)
    }
}

/// Optional exact-match filters for listing questions.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuestionFilter {
    /// Only questions of this branch.
    pub branch: Option<String>,
    /// Only questions of this subject.
    pub subject: Option<String>,
}

impl QuestionFilter {
    /// Builds the query document. Empty values impose no constraint.
    pub fn into_document(self) -> Document {
        let mut filter = Document::new();
        for (key, value) in [("branch", self.branch), ("subject", self.subject)] {
            if let Some(value) = value.filter(|value| !value.is_empty()) {
                filter.insert(key, value);
            }
        }
        filter
    }
}

/// Question as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<Correct>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.to_hex(),
            branch: question.branch,
            subject: question.subject,
            question: question.question,
            options: question.options,
            correct: question.correct,
            question_type: question.question_type,
            explanation: question.explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn correct_accepts_index_or_indices() {
        let single: QuestionInput = serde_json::from_value(json!({ "correct": 1 })).unwrap();
        assert_eq!(single.correct, Some(Some(Correct::Single(1))));

        let multiple: QuestionInput =
            serde_json::from_value(json!({ "correct": [0, 2], "type": "mcq" })).unwrap();
        assert_eq!(multiple.correct, Some(Some(Correct::Multiple(vec![0, 2]))));

        let cleared: QuestionInput = serde_json::from_value(json!({ "correct": null })).unwrap();
        assert_eq!(cleared.correct, Some(None));
        assert_eq!(
            cleared.into_document().unwrap(),
            doc! { "correct": bson::Bson::Null }
        );

        assert!(serde_json::from_value::<QuestionInput>(json!({ "correct": "zero" })).is_err());
    }

    #[test]
    fn correct_survives_storage() {
        let input: QuestionInput = serde_json::from_value(json!({
            "question": "Pick the stack operations",
            "options": ["push", "enqueue", "pop"],
            "correct": [0, 2],
            "type": "msq"
        }))
        .unwrap();

        let mut document = input.into_document().unwrap();
        document.insert("_id", ObjectId::new());
        let stored: Question = bson::from_document(document).unwrap();

        assert_eq!(stored.correct, Some(Correct::Multiple(vec![0, 2])));
        assert_eq!(stored.question_type.as_deref(), Some("msq"));
        assert_eq!(stored.options.len(), 3);
    }

    #[test]
    fn filter_skips_missing_and_empty_values() {
        let both = QuestionFilter {
            branch: Some("CS".to_string()),
            subject: Some("Algorithms".to_string()),
        };
        assert_eq!(both.into_document(), doc! { "branch": "CS", "subject": "Algorithms" });

        let empty_branch = QuestionFilter {
            branch: Some(String::new()),
            subject: Some("DS".to_string()),
        };
        assert_eq!(empty_branch.into_document(), doc! { "subject": "DS" });

        assert!(QuestionFilter::default().into_document().is_empty());
    }
}
