use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quiz Backend API",
        version = "0.1.0",
        description = "CRUD endpoints for quiz users and questions."
    ),
    paths(
        crate::handlers::users::list_users,
        crate::handlers::users::create_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::questions::list_questions,
        crate::handlers::questions::create_question,
        crate::handlers::questions::update_question,
        crate::handlers::questions::delete_question,
    ),
    components(schemas(
        crate::models::user::UserInput,
        crate::models::user::UserResponse,
        crate::models::question::Correct,
        crate::models::question::QuestionInput,
        crate::models::question::QuestionResponse,
        crate::models::DeleteResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "users", description = "User management"),
        (name = "questions", description = "Quiz question bank"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_resource_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/users",
            "/api/users/{id}",
            "/api/questions",
            "/api/questions/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
