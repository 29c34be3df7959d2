// src/handlers/users.rs

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use bson::Document;

use super::{json_body, object_id};
use crate::{
    db::Collection,
    error::{AppError, ErrorResponse},
    models::{
        DeleteResponse,
        user::{User, UserInput, UserResponse},
    },
};

/// Lists every user. No filtering, no pagination.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "users"
)]
pub async fn list_users(
    State(users): State<Collection<User>>,
) -> Result<impl IntoResponse, AppError> {
    let users = users
        .find(Document::new())
        .await
        .map_err(|e| AppError::internal("Error fetching users", e))?;

    Ok(Json(
        users.into_iter().map(UserResponse::from).collect::<Vec<_>>(),
    ))
}

/// Creates a user from whatever fields the body supplies.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed body or store failure", body = ErrorResponse),
    ),
    tag = "users"
)]
pub async fn create_user(
    State(users): State<Collection<User>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    const FAILURE: &str = "Error creating user";

    let payload: UserInput =
        json_body(&headers, &body).map_err(|e| AppError::bad_request(FAILURE, e))?;
    let fields = payload
        .into_document()
        .map_err(|e| AppError::bad_request(FAILURE, e))?;

    let user = users
        .create(fields)
        .await
        .map_err(|e| AppError::bad_request(FAILURE, e))?;

    tracing::info!("Created user {}", user.id);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Overwrites the supplied fields of a user, leaving the others unchanged.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ObjectId")),
    request_body = UserInput,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Malformed id, body or store failure", body = ErrorResponse),
        (status = 404, description = "No user with this id", body = ErrorResponse),
    ),
    tag = "users"
)]
pub async fn update_user(
    State(users): State<Collection<User>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    const FAILURE: &str = "Error updating user";

    let id = object_id(&id).map_err(|e| AppError::bad_request(FAILURE, e))?;
    let payload: UserInput =
        json_body(&headers, &body).map_err(|e| AppError::bad_request(FAILURE, e))?;
    let changes = payload
        .into_document()
        .map_err(|e| AppError::bad_request(FAILURE, e))?;

    let user = users
        .update(id, changes)
        .await
        .map_err(|e| AppError::bad_request(FAILURE, e))?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(user)))
}

/// Deletes a user by id.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User ObjectId")),
    responses(
        (status = 200, description = "User deleted", body = DeleteResponse),
        (status = 404, description = "No user with this id", body = ErrorResponse),
        (status = 500, description = "Malformed id or store failure", body = ErrorResponse),
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(users): State<Collection<User>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    const FAILURE: &str = "Error deleting user";

    let id = object_id(&id).map_err(|e| AppError::internal(FAILURE, e))?;

    let deleted = users
        .delete(id)
        .await
        .map_err(|e| AppError::internal(FAILURE, e))?;
    if !deleted {
        return Err(AppError::not_found("User not found"));
    }

    tracing::info!("Deleted user {}", id);
    Ok(Json(DeleteResponse::new("User deleted successfully")))
}
