//! Service information endpoint.

use actix_web::{get, HttpResponse};
use serde_json::json;

use super::envelope::ApiResponse;

/// Root health/info check naming the service and its endpoints.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is running")),
    tags = ["health"],
    operation_id = "healthCheck"
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        "SmartLife backend is running",
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "expenses": {
                    "add": "POST /api/expenses",
                    "list": "GET /api/expenses",
                    "get": "GET /api/expenses/{id}",
                    "delete": "DELETE /api/expenses/{id}"
                },
                "interview": {
                    "generate": "POST /api/interview/questions",
                    "by_difficulty": "POST /api/interview/questions/{difficulty}"
                }
            }
        }),
    ))
}
