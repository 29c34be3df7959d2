// src/routes.rs

use std::path::Path;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{Method, StatusCode},
    routing::{MethodRouter, get, get_service, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    handlers::{questions, users},
    openapi::ApiDoc,
    state::AppState,
};

/// Largest accepted request body.
const BODY_LIMIT: usize = 100 * 1024;

/// Assembles the main application router.
///
/// * API routes match first, by path and method. A method an API path does
///   not handle falls through to the frontend like any other request.
/// * Everything else is served from the public directory, and any GET that
///   matches no asset receives `index.html`.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let frontend = frontend(&state.config.public_dir);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/users",
            get(users::list_users)
                .post(users::create_user)
                .fallback_service(frontend.clone()),
        )
        .route(
            "/api/users/{id}",
            put(users::update_user)
                .delete(users::delete_user)
                .fallback_service(frontend.clone()),
        )
        .route(
            "/api/questions",
            get(questions::list_questions)
                .post(questions::create_question)
                .fallback_service(frontend.clone()),
        )
        .route(
            "/api/questions/{id}",
            put(questions::update_question)
                .delete(questions::delete_question)
                .fallback_service(frontend.clone()),
        )
        .route(
            "/api/openapi.json",
            get(openapi_json).fallback_service(frontend.clone()),
        )
        .fallback_service(frontend)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Static assets with `index.html` as the answer to unmatched GET/HEAD
/// requests. Other methods get 404.
fn frontend(public_dir: &Path) -> MethodRouter {
    let index = ServeFile::new(public_dir.join("index.html"));
    get_service(ServeDir::new(public_dir).fallback(index)).fallback(not_found)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
