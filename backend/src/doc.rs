//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI document for the
//! REST API and the route that serves it as JSON.

use actix_web::{get, web};
use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorSchema, ExpenseSchema, QuestionSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SmartLife backend API",
        description = "Expense ledger and AI-assisted interview preparation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::index,
        crate::inbound::http::expenses::create_expense,
        crate::inbound::http::expenses::list_expenses,
        crate::inbound::http::expenses::get_expense,
        crate::inbound::http::expenses::delete_expense,
        crate::inbound::http::interview::generate_questions,
        crate::inbound::http::interview::generate_questions_by_difficulty,
    ),
    components(schemas(ExpenseSchema, QuestionSchema, ErrorSchema)),
    tags(
        (name = "expenses", description = "Personal expense ledger"),
        (name = "interview", description = "Interview question generation"),
        (name = "health", description = "Service information")
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document.
#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_rest_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/api/expenses",
            "/api/expenses/{id}",
            "/api/interview/questions",
            "/api/interview/questions/{difficulty}",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path: {path}"
            );
        }
    }
}
