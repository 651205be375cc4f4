mod common;
use reqwest::StatusCode;
use serde_json::json;

use crate::common::{Action, Flow, learner_action, setup_server};

#[tokio::test]
async fn route_progress_upsert_and_list() {
    let mut app = setup_server().await;
    let course_id = app.fixture.course_id;
    let intro_id = app.fixture.intro_id;

    Flow::new()
        .step(
            Action::new("progress_anonymous", "POST", "/api/v1/user-progress")
                .with_body(json!({}))
                .with_expect(StatusCode::UNAUTHORIZED),
        )
        .step(learner_action())
        .step(
            Action::new("progress_started", "POST", "/api/v1/user-progress")
                .with_dyn_body(move |ctx| {
                    json!({
                        "userId": ctx.data_id("me"),
                        "courseId": course_id,
                        "sectionId": intro_id,
                        "isCompleted": false,
                        "timeSpent": 30,
                    })
                })
                .assert_body(|body| {
                    assert_eq!(body["data"]["isCompleted"], false);
                    assert_eq!(body["data"]["completionPercentage"], 0);
                }),
        )
        // same (user, section) replaces the row
        .step(
            Action::new("progress_completed", "POST", "/api/v1/user-progress")
                .with_dyn_body(move |ctx| {
                    json!({
                        "userId": ctx.data_id("me"),
                        "courseId": course_id,
                        "sectionId": intro_id,
                        "isCompleted": true,
                    })
                })
                .assert_body(|body| {
                    assert_eq!(body["data"]["isCompleted"], true);
                    assert_eq!(body["data"]["completionPercentage"], 100);
                }),
        )
        .step(
            Action::new("progress_list", "GET", "/api/v1/user-progress")
                .with_param("courseId", &course_id.to_string())
                .assert_body(|body| {
                    let rows = body["data"].as_array().unwrap();
                    assert_eq!(rows.len(), 1);
                    assert_eq!(rows[0]["isCompleted"], true);
                }),
        )
        .run(&mut app.server)
        .await;
}

#[tokio::test]
async fn route_progress_validation() {
    let mut app = setup_server().await;
    let course_id = app.fixture.course_id;
    let intro_id = app.fixture.intro_id;

    Flow::new()
        .step(learner_action())
        .step(
            Action::new("progress_missing", "POST", "/api/v1/user-progress")
                .with_body(json!({ "courseId": course_id }))
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_error("Missing required fields: userId, sectionId"),
        )
        .step(
            Action::new("progress_out_of_range", "POST", "/api/v1/user-progress")
                .with_dyn_body(move |ctx| {
                    json!({
                        "userId": ctx.data_id("me"),
                        "courseId": course_id,
                        "sectionId": intro_id,
                        "completionPercentage": 140,
                    })
                })
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(|body| assert_eq!(body["success"], false)),
        )
        .step(
            Action::new("progress_malformed", "POST", "/api/v1/user-progress")
                .with_raw_body("[1, 2")
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(|body| assert_eq!(body["success"], false)),
        )
        .run(&mut app.server)
        .await;
}
