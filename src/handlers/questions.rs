// src/handlers/questions.rs

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use super::{json_body, object_id};
use crate::{
    db::Collection,
    error::{AppError, ErrorResponse},
    models::{
        DeleteResponse,
        question::{Question, QuestionFilter, QuestionInput, QuestionResponse},
    },
};

/// Lists questions, optionally narrowed by exact `branch` and `subject` matches.
#[utoipa::path(
    get,
    path = "/api/questions",
    params(QuestionFilter),
    responses(
        (status = 200, description = "Matching questions", body = [QuestionResponse]),
        (status = 500, description = "Malformed query or store failure", body = ErrorResponse),
    ),
    tag = "questions"
)]
pub async fn list_questions(
    State(questions): State<Collection<Question>>,
    filter: Result<Query<QuestionFilter>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    const FAILURE: &str = "Error fetching questions";

    let Query(filter) = filter.map_err(|e| AppError::internal(FAILURE, e.body_text()))?;
    let questions = questions
        .find(filter.into_document())
        .await
        .map_err(|e| AppError::internal(FAILURE, e))?;

    Ok(Json(
        questions
            .into_iter()
            .map(QuestionResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Creates a question. `correct` may be an index or a list of indices.
#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = QuestionInput,
    responses(
        (status = 201, description = "Question created", body = QuestionResponse),
        (status = 400, description = "Malformed body or store failure", body = ErrorResponse),
    ),
    tag = "questions"
)]
pub async fn create_question(
    State(questions): State<Collection<Question>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    const FAILURE: &str = "Error creating question";

    let payload: QuestionInput =
        json_body(&headers, &body).map_err(|e| AppError::bad_request(FAILURE, e))?;
    let fields = payload
        .into_document()
        .map_err(|e| AppError::bad_request(FAILURE, e))?;

    let question = questions
        .create(fields)
        .await
        .map_err(|e| AppError::bad_request(FAILURE, e))?;

    tracing::info!("Created question {}", question.id);
    Ok((StatusCode::CREATED, Json(QuestionResponse::from(question))))
}

/// Overwrites the supplied fields of a question.
#[utoipa::path(
    put,
    path = "/api/questions/{id}",
    params(("id" = String, Path, description = "Question ObjectId")),
    request_body = QuestionInput,
    responses(
        (status = 200, description = "Updated question", body = QuestionResponse),
        (status = 400, description = "Malformed id, body or store failure", body = ErrorResponse),
        (status = 404, description = "No question with this id", body = ErrorResponse),
    ),
    tag = "questions"
)]
pub async fn update_question(
    State(questions): State<Collection<Question>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    const FAILURE: &str = "Error updating question";

    let id = object_id(&id).map_err(|e| AppError::bad_request(FAILURE, e))?;
    let payload: QuestionInput =
        json_body(&headers, &body).map_err(|e| AppError::bad_request(FAILURE, e))?;
    let changes = payload
        .into_document()
        .map_err(|e| AppError::bad_request(FAILURE, e))?;

    let question = questions
        .update(id, changes)
        .await
        .map_err(|e| AppError::bad_request(FAILURE, e))?
        .ok_or_else(|| AppError::not_found("Question not found"))?;

    Ok(Json(QuestionResponse::from(question)))
}

/// Deletes a question by id.
#[utoipa::path(
    delete,
    path = "/api/questions/{id}",
    params(("id" = String, Path, description = "Question ObjectId")),
    responses(
        (status = 200, description = "Question deleted", body = DeleteResponse),
        (status = 404, description = "No question with this id", body = ErrorResponse),
        (status = 500, description = "Malformed id or store failure", body = ErrorResponse),
    ),
    tag = "questions"
)]
pub async fn delete_question(
    State(questions): State<Collection<Question>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    const FAILURE: &str = "Error deleting question";

    let id = object_id(&id).map_err(|e| AppError::internal(FAILURE, e))?;

    let deleted = questions
        .delete(id)
        .await
        .map_err(|e| AppError::internal(FAILURE, e))?;
    if !deleted {
        return Err(AppError::not_found("Question not found"));
    }

    tracing::info!("Deleted question {}", id);
    Ok(Json(DeleteResponse::new("Question deleted successfully")))
}
