mod common;
use reqwest::StatusCode;
use safety_lms::web::UserRole;
use serde_json::{Value, json};

use crate::common::{Action, Flow, create_staff, learner_action, setup_server, signin_action};

fn menu_names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn route_navigation_by_role() {
    let mut app = setup_server().await;
    create_staff(&app.store, "boss@plant.example", "permit", UserRole::Admin).await;

    Flow::new()
        .step(
            Action::new("navigation_anonymous", "GET", "/api/v1/navigation")
                .with_expect(StatusCode::UNAUTHORIZED),
        )
        .step(learner_action())
        .step(Action::new("navigation_user", "GET", "/api/v1/navigation").assert_body(|body| {
            let names = menu_names(body);
            assert!(names.contains(&String::from("Dashboard")));
            assert!(!names.contains(&String::from("Reports")));
            assert!(!names.contains(&String::from("Settings")));
        }))
        .step(signin_action("boss@plant.example", "permit").with_clear_cookies(true))
        .step(Action::new("navigation_admin", "GET", "/api/v1/navigation").assert_body(|body| {
            let names = menu_names(body);
            assert!(names.contains(&String::from("Reports")));
            assert!(names.contains(&String::from("Settings")));
        }))
        .run(&mut app.server)
        .await;
}

#[tokio::test]
async fn route_dashboard_counts() {
    let mut app = setup_server().await;
    let question_id = app.fixture.question_id;
    let course_id = app.fixture.course_id;
    let intro_id = app.fixture.intro_id;

    Flow::new()
        .step(learner_action())
        .step(
            Action::new("dashboard_empty", "GET", "/api/v1/dashboard").assert_body(|body| {
                assert_eq!(body["data"]["fullName"], "Test Learner");
                assert_eq!(body["data"]["totalCourses"], 1);
                assert_eq!(body["data"]["totalAnswers"], 0);
                assert_eq!(body["data"]["accuracy"], 0.0);
            }),
        )
        .step(
            Action::new("attempt", "POST", "/api/v1/quiz-attempts")
                .with_dyn_body(move |ctx| {
                    json!({
                        "userId": ctx.data_id("me"),
                        "quizQuestionId": question_id,
                        "userAnswer": "false",
                        "isCorrect": true,
                    })
                })
                .with_expect(StatusCode::CREATED),
        )
        .step(
            Action::new("progress", "POST", "/api/v1/user-progress").with_dyn_body(move |ctx| {
                json!({
                    "userId": ctx.data_id("me"),
                    "courseId": course_id,
                    "sectionId": intro_id,
                    "isCompleted": true,
                })
            }),
        )
        .step(Action::new("dashboard", "GET", "/api/v1/dashboard").assert_body(|body| {
            assert_eq!(body["data"]["completedSections"], 1);
            assert_eq!(body["data"]["totalAnswers"], 1);
            assert_eq!(body["data"]["correctAnswers"], 1);
            assert_eq!(body["data"]["accuracy"], 100.0);
        }))
        .run(&mut app.server)
        .await;
}

#[tokio::test]
async fn route_users_directory() {
    let mut app = setup_server().await;
    create_staff(&app.store, "manager@plant.example", "permit", UserRole::Manager).await;

    Flow::new()
        .step(learner_action())
        .step(
            Action::new("users_as_learner", "GET", "/api/v1/users")
                .with_expect(StatusCode::FORBIDDEN)
                .assert_error("Forbidden"),
        )
        .step(signin_action("manager@plant.example", "permit").with_clear_cookies(true))
        .step(Action::new("users", "GET", "/api/v1/users").assert_body(|body| {
            assert_eq!(body["data"]["total"], 2);
            assert_eq!(body["data"]["limit"], 50);
        }))
        .step(
            Action::new("users_search", "GET", "/api/v1/users")
                .with_param("search", "LEARNER@")
                .assert_body(|body| {
                    assert_eq!(body["data"]["total"], 1);
                    assert_eq!(body["data"]["items"][0]["email"], "learner@plant.example");
                }),
        )
        .step(
            Action::new("users_by_role", "GET", "/api/v1/users")
                .with_param("role", "manager")
                .with_param("limit", "1")
                .assert_body(|body| {
                    assert_eq!(body["data"]["total"], 1);
                    assert_eq!(body["data"]["items"][0]["role"], "manager");
                }),
        )
        .run(&mut app.server)
        .await;
}
