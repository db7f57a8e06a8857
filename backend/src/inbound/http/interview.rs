//! Interview preparation API handlers.
//!
//! ```text
//! POST /api/interview/questions               Generate five questions
//! POST /api/interview/questions/{difficulty}  Generate, then filter
//! ```
//!
//! Generation never fails outward: remote-model trouble resolves to the
//! deterministic fallback set before a response is built.

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::{DifficultyFilter, DomainError, Topic, TopicValidationError};

use super::envelope::ApiResponse;
use super::error::ApiResult;
use super::state::HttpState;

/// Generation request body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TopicRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

/// Validate the request body into a [`Topic`].
fn parse_topic(request: TopicRequest) -> Result<Topic, DomainError> {
    let raw = request
        .topic
        .ok_or_else(|| DomainError::invalid_request("Topic is required"))?;
    Topic::new(raw).map_err(|err| match err {
        TopicValidationError::Empty => DomainError::invalid_request("Topic cannot be empty"),
    })
}

/// Generate five interview questions for a topic.
#[utoipa::path(
    post,
    path = "/api/interview/questions",
    responses(
        (status = 200, description = "Five questions, model-generated or fallback"),
        (status = 400, description = "Validation failure"),
        (status = 500, description = "Unexpected internal fault")
    ),
    tags = ["interview"],
    operation_id = "generateQuestions"
)]
#[post("/interview/questions")]
pub async fn generate_questions(
    state: web::Data<HttpState>,
    payload: web::Json<TopicRequest>,
) -> ApiResult<HttpResponse> {
    let topic = parse_topic(payload.into_inner())?;
    let set = state.interview.generate(&topic).await;
    let message = format!("Generated 5 interview questions for '{topic}'");
    Ok(HttpResponse::Ok().json(ApiResponse::success(message, set.into_questions())))
}

/// Generate questions filtered by difficulty.
///
/// The path segment must be one of `Beginner`, `Intermediate`, `Advanced`
/// or `All`. Filtering happens after generation, so narrowing to a level
/// with no matches yields an empty list, not an error.
#[utoipa::path(
    post,
    path = "/api/interview/questions/{difficulty}",
    responses(
        (status = 200, description = "Filtered question list, possibly empty"),
        (status = 400, description = "Validation failure or unknown difficulty"),
        (status = 500, description = "Unexpected internal fault")
    ),
    tags = ["interview"],
    operation_id = "generateQuestionsByDifficulty"
)]
#[post("/interview/questions/{difficulty}")]
pub async fn generate_questions_by_difficulty(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<TopicRequest>,
) -> ApiResult<HttpResponse> {
    let topic = parse_topic(payload.into_inner())?;
    let raw_difficulty = path.into_inner();
    let filter = DifficultyFilter::from_path(&raw_difficulty).ok_or_else(|| {
        DomainError::invalid_request(
            "Invalid difficulty level. Must be one of: Beginner, Intermediate, Advanced, All",
        )
    })?;
    let questions = state.interview.questions_by_difficulty(&topic, filter).await;
    let message =
        format!("Generated interview questions for '{topic}' (Difficulty: {filter})");
    Ok(HttpResponse::Ok().json(ApiResponse::success(message, questions)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[test]
    fn parses_and_trims_a_valid_topic() {
        let topic = parse_topic(TopicRequest {
            topic: Some("  Machine Learning ".to_owned()),
        })
        .expect("valid topic");
        assert_eq!(topic.as_str(), "Machine Learning");
    }

    #[rstest]
    #[case::missing(None, "Topic is required")]
    #[case::empty(Some(String::new()), "Topic cannot be empty")]
    #[case::blank(Some("   ".to_owned()), "Topic cannot be empty")]
    fn rejects_missing_or_blank_topics(
        #[case] topic: Option<String>,
        #[case] expected_message: &str,
    ) {
        let error = parse_topic(TopicRequest { topic }).expect_err("invalid topic");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), expected_message);
    }
}
