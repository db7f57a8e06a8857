//! End-to-end coverage for the interview question endpoints, using
//! scripted models so no network access is required.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App};
use rstest::rstest;
use serde_json::{json, Value};

use backend::domain::ports::{
    DisabledQuestionModel, FixtureExpenseRepository, FixtureQuestionModel, QuestionModel,
};
use backend::domain::InterviewService;
use backend::inbound::http::HttpState;
use backend::server::app_config;

fn state_with_model(model: Arc<dyn QuestionModel>) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(FixtureExpenseRepository::new()),
        Arc::new(InterviewService::new(model)),
    ))
}

/// A well-formed model reply with a known difficulty mix.
fn scripted_reply() -> String {
    json!([
        {"question": "Q1", "answer": "A1", "difficulty": "Beginner"},
        {"question": "Q2", "answer": "A2", "difficulty": "Beginner"},
        {"question": "Q3", "answer": "A3", "difficulty": "Intermediate"},
        {"question": "Q4", "answer": "A4", "difficulty": "Advanced"},
        {"question": "Q5", "answer": "A5", "difficulty": "Advanced"},
    ])
    .to_string()
}

async fn post_json(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    uri: &str,
    body: Value,
) -> actix_web::dev::ServiceResponse {
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

#[actix_web::test]
async fn scripted_model_replies_pass_through_in_order() {
    let state = state_with_model(Arc::new(FixtureQuestionModel::new(scripted_reply())));
    let app = actix_test::init_service(App::new().configure(app_config(state))).await;

    let response = post_json(&app, "/api/interview/questions", json!({"topic": "Rust"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Generated 5 interview questions for 'Rust'");
    let questions = body["data"].as_array().expect("data array");
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["question"], "Q1");
    assert_eq!(questions[4]["answer"], "A5");
    assert_eq!(questions[3]["difficulty"], "Advanced");
}

#[rstest]
#[case::not_json("I cannot help with that.")]
#[case::wrong_count(r#"[{"question": "Q1", "answer": "A1", "difficulty": "Beginner"}]"#)]
#[case::empty_answer(
    r#"[
        {"question": "Q1", "answer": "", "difficulty": "Beginner"},
        {"question": "Q2", "answer": "A2", "difficulty": "Beginner"},
        {"question": "Q3", "answer": "A3", "difficulty": "Intermediate"},
        {"question": "Q4", "answer": "A4", "difficulty": "Advanced"},
        {"question": "Q5", "answer": "A5", "difficulty": "Advanced"}
    ]"#
)]
#[actix_web::test]
async fn unusable_model_replies_resolve_to_the_fallback_set(#[case] reply: &str) {
    let state = state_with_model(Arc::new(FixtureQuestionModel::new(reply.to_owned())));
    let app = actix_test::init_service(App::new().configure(app_config(state))).await;

    let response = post_json(&app, "/api/interview/questions", json!({"topic": "Rust"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    let questions = body["data"].as_array().expect("data array");
    assert_eq!(questions.len(), 5);
    assert_eq!(
        questions[0]["question"],
        "What are the key concepts and principles in Rust?"
    );
}

#[actix_web::test]
async fn unconfigured_model_serves_the_fallback_set() {
    let state = state_with_model(Arc::new(DisabledQuestionModel));
    let app = actix_test::init_service(App::new().configure(app_config(state))).await;

    let response = post_json(
        &app,
        "/api/interview/questions",
        json!({"topic": "Databases"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    let questions = body["data"].as_array().expect("data array");
    assert_eq!(questions.len(), 5);
    assert!(questions[0]["question"]
        .as_str()
        .expect("question text")
        .contains("Databases"));
}

#[actix_web::test]
async fn difficulty_filter_narrows_a_scripted_set() {
    let state = state_with_model(Arc::new(FixtureQuestionModel::new(scripted_reply())));
    let app = actix_test::init_service(App::new().configure(app_config(state))).await;

    let response = post_json(
        &app,
        "/api/interview/questions/Beginner",
        json!({"topic": "Rust"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["message"],
        "Generated interview questions for 'Rust' (Difficulty: Beginner)"
    );
    let questions = body["data"].as_array().expect("data array");
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["question"], "Q1");
    assert_eq!(questions[1]["question"], "Q2");
}

#[actix_web::test]
async fn advanced_filter_on_the_fallback_set_keeps_two_questions() {
    let state = state_with_model(Arc::new(DisabledQuestionModel));
    let app = actix_test::init_service(App::new().configure(app_config(state))).await;

    let response = post_json(
        &app,
        "/api/interview/questions/Advanced",
        json!({"topic": "Rust"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    let questions = body["data"].as_array().expect("data array");
    assert_eq!(questions.len(), 2);
    for question in questions {
        assert_eq!(question["difficulty"], "Advanced");
    }
}

#[actix_web::test]
async fn filtering_to_a_missing_level_yields_an_empty_list() {
    // The fallback set carries no Beginner questions.
    let state = state_with_model(Arc::new(DisabledQuestionModel));
    let app = actix_test::init_service(App::new().configure(app_config(state))).await;

    let response = post_json(
        &app,
        "/api/interview/questions/Beginner",
        json!({"topic": "Rust"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"], json!([]));
}

#[actix_web::test]
async fn all_filter_returns_every_question() {
    let state = state_with_model(Arc::new(FixtureQuestionModel::new(scripted_reply())));
    let app = actix_test::init_service(App::new().configure(app_config(state))).await;

    let response = post_json(
        &app,
        "/api/interview/questions/All",
        json!({"topic": "Rust"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["data"].as_array().expect("data array").len(), 5);
}

#[rstest]
#[case::lowercase("beginner")]
#[case::unknown("Expert")]
#[actix_web::test]
async fn unknown_difficulty_segments_are_rejected(#[case] segment: &str) {
    let state = state_with_model(Arc::new(DisabledQuestionModel));
    let app = actix_test::init_service(App::new().configure(app_config(state))).await;

    let response = post_json(
        &app,
        &format!("/api/interview/questions/{segment}"),
        json!({"topic": "Rust"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["message"],
        "Invalid difficulty level. Must be one of: Beginner, Intermediate, Advanced, All"
    );
}

#[rstest]
#[case::missing(json!({}), "Topic is required")]
#[case::empty(json!({"topic": ""}), "Topic cannot be empty")]
#[case::blank(json!({"topic": "   "}), "Topic cannot be empty")]
#[actix_web::test]
async fn missing_or_blank_topics_are_rejected(#[case] body: Value, #[case] expected_message: &str) {
    let state = state_with_model(Arc::new(DisabledQuestionModel));
    let app = actix_test::init_service(App::new().configure(app_config(state))).await;

    let response = post_json(&app, "/api/interview/questions", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(error["status"], "error");
    assert_eq!(error["message"], expected_message);
}

#[actix_web::test]
async fn topic_is_validated_before_the_difficulty_segment() {
    let state = state_with_model(Arc::new(DisabledQuestionModel));
    let app = actix_test::init_service(App::new().configure(app_config(state))).await;

    // Both the topic and the segment are invalid; the topic error wins.
    let response = post_json(&app, "/api/interview/questions/Expert", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(error["message"], "Topic is required");
}
