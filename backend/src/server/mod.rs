//! Server wiring: explicit component construction and route registration.
//!
//! Components are built once here, bundled into [`HttpState`] and injected
//! into the handlers — no hidden process-wide singletons.

pub mod config;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};

use crate::doc;
use crate::domain::ports::{DisabledQuestionModel, QuestionModel};
use crate::domain::InterviewService;
use crate::inbound::http::{error, expenses, health, interview, HttpState};
use crate::outbound::openai::OpenAiHttpModel;
use crate::outbound::persistence::{self, DbPool, DieselExpenseRepository, PoolConfig};

pub use config::{AppConfig, ConfigError, OpenAiConfig};

/// Register routes and shared state on an Actix app.
///
/// Used by both the production server and the integration tests, so the
/// two always agree on routing and JSON error handling.
pub fn app_config(state: web::Data<HttpState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(state)
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .service(health::index)
            .service(doc::openapi_json)
            .service(
                web::scope("/api")
                    .service(expenses::create_expense)
                    .service(expenses::list_expenses)
                    .service(expenses::get_expense)
                    .service(expenses::delete_expense)
                    .service(interview::generate_questions)
                    .service(interview::generate_questions_by_difficulty),
            );
    }
}

/// Build the shared state from configuration: pool, migrations, model.
///
/// # Errors
///
/// Fails when the database cannot be opened or migrated, or the model
/// client cannot be constructed.
pub fn build_state(config: &AppConfig) -> std::io::Result<HttpState> {
    let pool = DbPool::new(PoolConfig::new(&config.database_url)).map_err(io_error)?;
    persistence::run_migrations(&pool).map_err(io_error)?;
    let expenses = Arc::new(DieselExpenseRepository::new(pool));

    let model: Arc<dyn QuestionModel> = match &config.openai {
        Some(openai) => Arc::new(
            OpenAiHttpModel::new(
                openai.base_url.clone(),
                openai.api_key.clone(),
                openai.model.clone(),
                openai.timeout,
            )
            .map_err(io_error)?,
        ),
        None => {
            warn!("OPENAI_API_KEY not set; interview questions will use the built-in fallback set");
            Arc::new(DisabledQuestionModel)
        }
    };

    Ok(HttpState::new(expenses, Arc::new(InterviewService::new(model))))
}

/// Application bootstrap: wire components and serve until shutdown.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let state = web::Data::new(build_state(&config)?);

    info!(addr = %config.bind_addr, "starting SmartLife backend");
    HttpServer::new(move || App::new().configure(app_config(state.clone())))
        .bind(config.bind_addr)?
        .run()
        .await
}

fn io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}
