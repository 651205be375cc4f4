mod common;
use reqwest::StatusCode;
use serde_json::json;

use crate::common::{Action, Flow, learner_action, setup_server};

const LEARNING: &str = "/api/v1/courses/lockout-tagout/learning";

#[tokio::test]
async fn route_learning_anonymous() {
    let mut app = setup_server().await;

    Flow::new()
        .step(Action::new("learning", "GET", LEARNING).assert_body(|body| {
            let data = &body["data"];
            assert_eq!(data["course"]["slug"], "lockout-tagout");

            let sections = data["sections"].as_array().unwrap();
            assert_eq!(sections.len(), 2);
            assert_eq!(sections[0]["sectionKey"], "intro");
            assert_eq!(sections[0]["accessible"], true);
            assert_eq!(sections[1]["accessible"], false);
            assert_eq!(sections[0]["questions"].as_array().unwrap().len(), 1);
            assert!(sections[0]["html"].as_str().unwrap().contains("Lockout/Tagout"));
            assert!(
                sections[1]["html"]
                    .as_str()
                    .unwrap()
                    .contains("Unsupported block type: hologram")
            );

            assert_eq!(data["progress"]["overallProgress"], 0.0);
            let modules = data["navigation"]["modules"].as_array().unwrap();
            assert_eq!(modules[0]["status"], "in_progress");
            assert_eq!(modules[1]["status"], "locked");
            assert_eq!(modules[0]["href"], "/courses/lockout-tagout/learn/intro");
        }))
        .step(
            Action::new("learning_unknown", "GET", "/api/v1/courses/confined-space/learning")
                .with_expect(StatusCode::NOT_FOUND)
                .assert_error("Course not found"),
        )
        .run(&mut app.server)
        .await;
}

#[tokio::test]
async fn route_learning_merges_progress() {
    let mut app = setup_server().await;
    let course_id = app.fixture.course_id;
    let intro_id = app.fixture.intro_id;

    Flow::new()
        .step(learner_action())
        .step(
            Action::new("complete_intro", "POST", "/api/v1/user-progress").with_dyn_body(
                move |ctx| {
                    json!({
                        "userId": ctx.data_id("me"),
                        "courseId": course_id,
                        "sectionId": intro_id,
                        "isCompleted": true,
                    })
                },
            ),
        )
        .step(Action::new("learning", "GET", LEARNING).assert_body(move |body| {
            let data = &body["data"];
            assert_eq!(data["sections"][0]["completed"], true);
            assert_eq!(data["sections"][1]["accessible"], true);
            assert_eq!(data["progress"]["overallProgress"], 50.0);
            assert_eq!(data["progress"]["completedSections"], json!([intro_id]));
            assert_eq!(data["navigation"]["modules"][0]["status"], "completed");
        }))
        .run(&mut app.server)
        .await;
}

#[tokio::test]
async fn route_learning_store_failure() {
    let mut app = setup_server().await;
    app.store.set_unavailable(true);

    Flow::new()
        .step(
            Action::new("learning_down", "GET", LEARNING)
                .with_expect(StatusCode::INTERNAL_SERVER_ERROR)
                .assert_error("Internal server error"),
        )
        .run(&mut app.server)
        .await;
}
