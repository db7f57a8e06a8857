//! Expense ledger API handlers.
//!
//! ```text
//! POST   /api/expenses       Add an expense
//! GET    /api/expenses       List all expenses, most recent date first
//! GET    /api/expenses/{id}  Fetch one expense
//! DELETE /api/expenses/{id}  Delete one expense
//! ```
//!
//! This is the validation boundary: payloads are checked field by field
//! before any component call, so a rejected request never touches storage.

use actix_web::{delete, get, post, web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::ExpenseRepositoryError;
use crate::domain::{DomainError, ExpenseValidationError, NewExpense};

use super::envelope::ApiResponse;
use super::error::ApiResult;
use super::state::HttpState;

/// Expense creation body. Fields are optional so missing keys can be
/// reported precisely; `amount` stays a raw JSON value until coercion.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateExpenseRequest {
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Coerce the `amount` value from a JSON number or numeric string.
fn coerce_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

/// Validate a creation payload into a [`NewExpense`].
///
/// Checks run in a fixed order so the reported message always names the
/// first failing condition: missing keys, amount coercion, date format,
/// then amount range and category content.
fn parse_create_request(request: CreateExpenseRequest) -> Result<NewExpense, DomainError> {
    let mut missing = Vec::new();
    if request.amount.is_none() {
        missing.push("amount");
    }
    if request.category.is_none() {
        missing.push("category");
    }
    if !missing.is_empty() {
        return Err(DomainError::invalid_request(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let amount = request
        .amount
        .as_ref()
        .and_then(coerce_amount)
        .ok_or_else(|| DomainError::invalid_request("Amount must be a valid number"))?;

    let date = request
        .date
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| DomainError::invalid_request("Date must be in YYYY-MM-DD format"))
        })
        .transpose()?;

    NewExpense::new(
        amount,
        request.category.unwrap_or_default(),
        request.note.unwrap_or_default(),
        date,
    )
    .map_err(|err| match err {
        ExpenseValidationError::NonPositiveAmount => {
            DomainError::invalid_request("Amount must be greater than 0")
        }
        ExpenseValidationError::EmptyCategory => {
            DomainError::invalid_request("Category cannot be empty")
        }
    })
}

/// Map repository faults to an internal-error response.
fn map_repository_error(error: ExpenseRepositoryError) -> DomainError {
    DomainError::internal(error.to_string())
}

/// Add a new expense.
#[utoipa::path(
    post,
    path = "/api/expenses",
    responses(
        (status = 201, description = "Expense created"),
        (status = 400, description = "Validation failure"),
        (status = 500, description = "Storage failure")
    ),
    tags = ["expenses"],
    operation_id = "addExpense"
)]
#[post("/expenses")]
pub async fn create_expense(
    state: web::Data<HttpState>,
    payload: web::Json<CreateExpenseRequest>,
) -> ApiResult<HttpResponse> {
    let expense = parse_create_request(payload.into_inner())?;
    let record = state
        .expenses
        .insert(expense)
        .await
        .map_err(map_repository_error)?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Expense added successfully", record)))
}

/// List all expenses, most recent calendar date first.
#[utoipa::path(
    get,
    path = "/api/expenses",
    responses(
        (status = 200, description = "Ordered expense list"),
        (status = 500, description = "Storage failure")
    ),
    tags = ["expenses"],
    operation_id = "listExpenses"
)]
#[get("/expenses")]
pub async fn list_expenses(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let records = state
        .expenses
        .list_all()
        .await
        .map_err(map_repository_error)?;
    let message = format!("Retrieved {} expenses", records.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(message, records)))
}

/// Fetch a single expense by id.
#[utoipa::path(
    get,
    path = "/api/expenses/{id}",
    responses(
        (status = 200, description = "Expense found"),
        (status = 404, description = "No expense with that id"),
        (status = 500, description = "Storage failure")
    ),
    tags = ["expenses"],
    operation_id = "getExpense"
)]
#[get("/expenses/{id}")]
pub async fn get_expense(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let record = state
        .expenses
        .find_by_id(id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| DomainError::not_found(format!("Expense with ID {id} not found")))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Expense retrieved", record)))
}

/// Delete an expense by id. Deleting an unknown id yields 404, not an
/// error inside the store.
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    responses(
        (status = 200, description = "Expense deleted"),
        (status = 404, description = "No expense with that id"),
        (status = 500, description = "Storage failure")
    ),
    tags = ["expenses"],
    operation_id = "deleteExpense"
)]
#[delete("/expenses/{id}")]
pub async fn delete_expense(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let removed = state
        .expenses
        .delete_by_id(id)
        .await
        .map_err(map_repository_error)?;
    if !removed {
        return Err(DomainError::not_found(format!("Expense with ID {id} not found")).into());
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Expense with ID {id} deleted successfully"),
        Value::Null,
    )))
}
