// tests/frontend_tests.rs

use std::path::PathBuf;

use quiz_backend::{config::Config, db::InMemoryStore, routes, state::AppState};

const INDEX_HTML: &str = "<!doctype html><title>Quiz</title><div id=\"app\"></div>";
const APP_JS: &str = "console.log('quiz');";

/// Writes a throwaway public directory with an entry document and one asset.
fn public_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quiz_public_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(dir.join("assets")).expect("Failed to create public dir");
    std::fs::write(dir.join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(dir.join("assets").join("app.js"), APP_JS).unwrap();
    dir
}

async fn spawn_app() -> String {
    let config = Config {
        mongo_uri: None,
        mongo_db_name: None,
        port: 0,
        public_dir: public_dir(),
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
    };

    let app = routes::create_router(AppState::new(InMemoryStore::new(), config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

#[tokio::test]
async fn existing_asset_is_served_as_is() {
    let address = spawn_app().await;

    let response = reqwest::get(format!("{}/assets/app.js", address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), APP_JS);
}

#[tokio::test]
async fn unknown_paths_receive_the_entry_document() {
    let address = spawn_app().await;

    for path in ["/", "/quiz/42/review", "/assets/missing.css", "/api/unknown"] {
        let response = reqwest::get(format!("{}{}", address, path)).await.unwrap();

        assert_eq!(response.status().as_u16(), 200, "status for {path}");
        assert_eq!(response.text().await.unwrap(), INDEX_HTML, "body for {path}");
    }
}

#[tokio::test]
async fn get_on_api_path_without_get_handler_falls_through() {
    let address = spawn_app().await;

    let response = reqwest::get(format!("{}/api/users/0123456789abcdef01234567", address))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), INDEX_HTML);
}

#[tokio::test]
async fn non_get_request_to_unknown_path_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/not/an/api", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn api_routes_win_over_the_catch_all() {
    let address = spawn_app().await;

    let response = reqwest::get(format!("{}/api/questions", address))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/users", address))
        .header("Origin", "https://quiz.example.org")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn openapi_document_is_published() {
    let address = spawn_app().await;

    let response = reqwest::get(format!("{}/api/openapi.json", address))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let doc: serde_json::Value = response.json().await.unwrap();
    assert!(doc["paths"]["/api/questions"]["get"].is_object());
    assert!(doc["paths"]["/api/users/{id}"]["delete"].is_object());
}
