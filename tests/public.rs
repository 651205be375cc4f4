mod common;
use reqwest::StatusCode;
use serde_json::Value;

use crate::common::{Action, Flow, setup_server};

fn order_indexes(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .expect("data is not a list")
        .iter()
        .map(|v| v["orderIndex"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn route_courses_test() {
    let mut app = setup_server().await;

    Flow::new()
        .step(
            Action::new("courses", "GET", "/api/v1/public/courses").assert_body(|body| {
                assert_eq!(body["success"], true);
                let courses = body["data"].as_array().unwrap();
                assert_eq!(courses.len(), 1);
                assert_eq!(courses[0]["slug"], "lockout-tagout");
                assert_eq!(courses[0]["durationMinutes"], 45);
            }),
        )
        .step(
            Action::new("courses_by_slug", "GET", "/api/v1/public/courses")
                .with_param("slug", "confined-space")
                .assert_body(|body| assert_eq!(body["data"], serde_json::json!([]))),
        )
        .step(
            Action::new("courses_by_category", "GET", "/api/v1/public/courses")
                .with_param("category", "electrical")
                .assert_body(|body| assert_eq!(body["data"].as_array().unwrap().len(), 1)),
        )
        .run(&mut app.server)
        .await;
}

#[tokio::test]
async fn route_sections_are_ordered() {
    let mut app = setup_server().await;
    let course_id = app.fixture.course_id.to_string();
    let intro_id = app.fixture.intro_id.to_string();

    Flow::new()
        .step(
            Action::new("sections", "GET", "/api/v1/public/course-sections")
                .with_param("courseId", &course_id)
                .assert_body(|body| {
                    assert_eq!(order_indexes(body), vec![1, 2]);
                    assert_eq!(body["data"][0]["sectionKey"], "intro");
                }),
        )
        .step(
            Action::new("blocks", "GET", "/api/v1/public/content-blocks")
                .with_param("sectionId", &intro_id)
                .assert_body(|body| {
                    assert_eq!(order_indexes(body), vec![1, 2]);
                    assert_eq!(body["data"][0]["blockType"], "hero");
                }),
        )
        .step(
            Action::new("questions", "GET", "/api/v1/public/quiz-questions")
                .with_param("sectionId", &intro_id)
                .assert_body(|body| {
                    assert_eq!(body["data"][0]["questionType"], "true-false");
                    assert_eq!(body["data"][0]["correctAnswer"], "false");
                }),
        )
        .run(&mut app.server)
        .await;
}

#[tokio::test]
async fn route_public_queries_validate() {
    let mut app = setup_server().await;

    Flow::new()
        .step(
            Action::new("sections_missing", "GET", "/api/v1/public/course-sections")
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_error("Missing required fields: courseId"),
        )
        .step(
            Action::new("blocks_missing", "GET", "/api/v1/public/content-blocks")
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_error("Missing required fields: sectionId"),
        )
        .step(
            Action::new("blocks_bad_uuid", "GET", "/api/v1/public/content-blocks")
                .with_param("sectionId", "not-a-uuid")
                .with_expect(StatusCode::BAD_REQUEST)
                .assert_body(|body| assert_eq!(body["success"], false)),
        )
        .run(&mut app.server)
        .await;
}

#[tokio::test]
async fn route_section_html_test() {
    let mut app = setup_server().await;
    let intro = format!("/api/v1/public/course-sections/{}/html", app.fixture.intro_id);
    let hazards = format!("/api/v1/public/course-sections/{}/html", app.fixture.hazards_id);
    let hero_id = app.fixture.hero_block_id.to_string();

    Flow::new()
        .step(Action::new("intro_html", "GET", &intro).assert_body(move |body| {
            let html = body["data"]["html"].as_str().unwrap();
            let hero = html.find("data-block-type=\"hero\"").expect("hero missing");
            let text = html.find("data-block-type=\"text\"").expect("text missing");
            assert!(hero < text);
            assert!(html.contains(&hero_id));
            assert!(html.contains("Stop the energy first"));
            assert!(html.contains("<p>Every isolation point gets its own lock.</p>"));
        }))
        .step(Action::new("unknown_tag_html", "GET", &hazards).assert_body(|body| {
            let html = body["data"]["html"].as_str().unwrap();
            assert!(html.contains("Unsupported block type: hologram"));
        }))
        .step(Action::new("malformed_block_html", "GET", &hazards).assert_body(|body| {
            let html = body["data"]["html"].as_str().unwrap();
            assert!(html.contains("Malformed text block"));
            assert!(html.contains("data-authoring-error=\"true\""));
            assert!(!html.contains("Stored energy"));
            // the rest of the section still renders
            assert!(html.find("hologram").unwrap() < html.find("Malformed").unwrap());
        }))
        .step(
            Action::new(
                "missing_section_html",
                "GET",
                "/api/v1/public/course-sections/00000000-0000-0000-0000-000000000000/html",
            )
            .with_expect(StatusCode::NOT_FOUND)
            .assert_body(|body| assert_eq!(body["success"], false)),
        )
        .run(&mut app.server)
        .await;
}

#[tokio::test]
async fn route_design_tokens_test() {
    let mut app = setup_server().await;

    Flow::new()
        .step(
            Action::new("tokens", "GET", "/api/v1/public/design-tokens").assert_body(|body| {
                assert_eq!(body["success"], true);
                assert!(body["data"]["colors"].is_array());
            }),
        )
        .run(&mut app.server)
        .await;
}

#[tokio::test]
async fn route_store_failure_is_generic() {
    let mut app = setup_server().await;
    app.store.set_unavailable(true);

    Flow::new()
        .step(
            Action::new("courses_down", "GET", "/api/v1/public/courses")
                .with_expect(StatusCode::INTERNAL_SERVER_ERROR)
                .assert_error("Internal server error"),
        )
        .run(&mut app.server)
        .await;
}
