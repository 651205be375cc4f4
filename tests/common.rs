use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use safety_lms::{
    Config,
    auth::hash_password,
    build_server_with_store,
    model::{
        LmsStore, MemoryStore,
        entity::{ContentBlock, Course, CourseSection, QuestionType, QuizQuestion, UserEntityCreate},
    },
    web::UserRole,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use sqlx::types::Json;
use tower_cookies::Cookie;
use uuid::Uuid;

const TEST_CONFIG: &str = r#"
[host]
bindto = "127.0.0.1:0"

[app]
jwt = "integration-test-secret"
database_uri = "memory://"
docs = false
"#;

/// Ids of the seeded "lockout-tagout" course.
#[derive(Debug, Clone, Copy)]
#[allow(unused)]
pub struct Fixture {
    pub course_id: Uuid,
    pub intro_id: Uuid,
    pub hazards_id: Uuid,
    pub hero_block_id: Uuid,
    pub question_id: Uuid,
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    #[allow(unused)]
    pub fixture: Fixture,
}

pub async fn setup_server() -> TestApp {
    let _ = dotenvy::dotenv();
    let config = Config::from_bytes(TEST_CONFIG.as_bytes()).unwrap();
    let store = Arc::new(MemoryStore::new());
    let fixture = seed_course(&store).await;

    let (_, app) = build_server_with_store(store.clone(), config).unwrap();
    TestApp {
        server: TestServer::new(app).unwrap(),
        store,
        fixture,
    }
}

/// Sections, blocks and questions are inserted out of order on purpose.
async fn seed_course(store: &MemoryStore) -> Fixture {
    let course_id = Uuid::new_v4();
    let intro_id = Uuid::new_v4();
    let hazards_id = Uuid::new_v4();
    let hero_block_id = Uuid::new_v4();
    let question_id = Uuid::new_v4();

    store
        .insert_course(Course {
            id: course_id,
            slug: String::from("lockout-tagout"),
            title: String::from("Lockout/Tagout Fundamentals"),
            description: String::from("Controlling hazardous energy during service work."),
            version: String::from("1.0"),
            is_published: true,
            category: String::from("electrical"),
            difficulty: String::from("beginner"),
            language: String::from("en"),
            duration_minutes: 45,
        })
        .await;

    store
        .insert_section(CourseSection {
            id: hazards_id,
            course_id,
            section_key: String::from("hazards"),
            title: String::from("Energy Hazards"),
            order_index: 2,
            icon_name: None,
            is_published: true,
        })
        .await;
    store
        .insert_section(CourseSection {
            id: intro_id,
            course_id,
            section_key: String::from("intro"),
            title: String::from("Introduction"),
            order_index: 1,
            icon_name: Some(String::from("book")),
            is_published: true,
        })
        .await;

    store
        .insert_block(ContentBlock {
            id: Uuid::new_v4(),
            section_id: intro_id,
            block_type: String::from("text"),
            order_index: 2,
            content: json!({ "content": "<p>Every isolation point gets its own lock.</p>" }),
            metadata: None,
        })
        .await;
    store
        .insert_block(ContentBlock {
            id: hero_block_id,
            section_id: intro_id,
            block_type: String::from("hero"),
            order_index: 1,
            content: json!({ "title": "Lockout/Tagout", "subtitle": "Stop the energy first" }),
            metadata: Some(json!({ "background": "gradient-blue" })),
        })
        .await;
    store
        .insert_block(ContentBlock {
            id: Uuid::new_v4(),
            section_id: hazards_id,
            block_type: String::from("hologram"),
            order_index: 1,
            content: json!({}),
            metadata: None,
        })
        .await;

    // authored with the wrong key
    store
        .insert_block(ContentBlock {
            id: Uuid::new_v4(),
            section_id: hazards_id,
            block_type: String::from("text"),
            order_index: 2,
            content: json!({ "html": "<p>Stored energy: springs, capacitors, pressure.</p>" }),
            metadata: None,
        })
        .await;

    store
        .insert_question(QuizQuestion {
            id: question_id,
            section_id: intro_id,
            question_key: String::from("loto-1"),
            question_type: QuestionType::TrueFalse,
            question_text: String::from("One lock may secure several workers."),
            options: Json(BTreeMap::from([
                (String::from("true"), String::from("True")),
                (String::from("false"), String::from("False")),
            ])),
            correct_answer: String::from("false"),
            explanation: Some(String::from("Each worker applies a personal lock.")),
            order_index: 1,
        })
        .await;

    Fixture {
        course_id,
        intro_id,
        hazards_id,
        hero_block_id,
        question_id,
    }
}

#[derive(Debug)]
pub struct FlowContext {
    pub store: HashMap<&'static str, Value>, // a way to pass data between steps
}

impl FlowContext {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn store(&mut self, key: &'static str, val: Value) {
        self.store.insert(key, val);
    }

    pub fn get(&self, key: &str) -> &Value {
        self.store.get(key).expect("missing store key")
    }

    #[allow(unused)]
    pub fn get_json<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned,
    {
        let obj = self.get(key);
        serde_json::from_value(obj.clone()).expect("Invalid json format")
    }

    /// `data.id` of a saved envelope.
    #[allow(unused)]
    pub fn data_id(&self, key: &str) -> String {
        self.get(key)["data"]["id"]
            .as_str()
            .expect("saved envelope has no data.id")
            .to_string()
    }
}

pub struct Action {
    #[allow(unused)]
    pub name: &'static str,
    pub method: &'static str,
    pub path: String,
    pub dyn_path: Option<Box<dyn Fn(&FlowContext) -> String + Send + Sync>>,
    pub body: Option<Value>,
    pub raw_body: Option<&'static str>,
    pub dyn_body: Option<Box<dyn Fn(&FlowContext) -> Value + Send + Sync>>,
    pub expect: StatusCode,
    pub clear_cookies: bool,
    pub save_cookies: bool,
    pub query_params: Vec<(String, String)>,
    pub cookie_asserts: Vec<(&'static str, Box<dyn Fn(&Cookie) + Send + Sync>)>,
    pub body_asserts: Vec<Box<dyn Fn(&Value) + Send + Sync>>,
    pub save_as: Option<&'static str>,
}

#[allow(unused)]
impl Action {
    pub fn new(name: &'static str, method: &'static str, path: &str) -> Self {
        Self {
            name,
            method,
            path: path.to_string(),
            dyn_path: None,
            body: None,
            raw_body: None,
            dyn_body: None,
            expect: StatusCode::OK,
            clear_cookies: false,
            save_cookies: true,
            query_params: vec![],
            cookie_asserts: vec![],
            body_asserts: vec![],
            save_as: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sent as-is with a JSON content type.
    pub fn with_raw_body(mut self, body: &'static str) -> Self {
        self.raw_body = Some(body);
        self
    }

    pub fn with_expect(mut self, expect: StatusCode) -> Self {
        self.expect = expect;
        self
    }

    pub fn with_save_cookies(mut self, save_cookies: bool) -> Self {
        self.save_cookies = save_cookies;
        self
    }

    pub fn with_clear_cookies(mut self, clear_cookies: bool) -> Self {
        self.clear_cookies = clear_cookies;
        self
    }

    pub fn with_param(mut self, key: &str, val: &str) -> Self {
        self.query_params.push((String::from(key), String::from(val)));
        self
    }

    pub fn with_dyn_path<F>(mut self, f: F) -> Self
    where
        F: Fn(&FlowContext) -> String + Send + Sync + 'static,
    {
        self.dyn_path = Some(Box::new(f));
        self
    }

    pub fn with_dyn_body<F>(mut self, f: F) -> Self
    where
        F: Fn(&FlowContext) -> Value + Send + Sync + 'static,
    {
        self.dyn_body = Some(Box::new(f));
        self
    }

    pub fn with_save_as(mut self, key: &'static str) -> Self {
        self.save_as = Some(key);
        self
    }

    pub fn assert_cookie<F>(mut self, name: &'static str, check: F) -> Self
    where
        F: Fn(&Cookie) + Send + Sync + 'static,
    {
        self.cookie_asserts.push((name, Box::new(check)));
        self
    }

    pub fn assert_body<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.body_asserts.push(Box::new(check));
        self
    }

    /// `{success: false, error}` with exactly this message.
    pub fn assert_error(self, message: &'static str) -> Self {
        self.assert_body(move |body| {
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], message);
            assert!(body.get("data").is_none());
        })
    }
}

pub struct Flow {
    actions: Vec<Action>,
}

impl Flow {
    pub fn new() -> Self {
        Self { actions: vec![] }
    }

    pub fn step(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub async fn run(self, server: &mut TestServer) -> FlowContext {
        let mut ctx = FlowContext::new(); // create new context for this flow
        for action in self.actions {
            println!("==> Running test action `{}`", action.name);
            if action.clear_cookies {
                server.clear_cookies();
            }

            if action.save_cookies {
                server.save_cookies();
            } else {
                server.do_not_save_cookies();
            }

            let path = if let Some(dyn_path_fn) = action.dyn_path {
                dyn_path_fn(&ctx)
            } else {
                action.path.clone()
            };

            let mut req = match action.method {
                "GET" => server.get(&path),
                "POST" => server.post(&path),
                "PUT" => server.put(&path),
                "DELETE" => server.delete(&path),
                _ => panic!("unsupported method {}", action.method),
            };

            match (action.dyn_body, action.body, action.raw_body) {
                (Some(f), _, _) => req = req.json(&f(&ctx)),
                (_, Some(json), _) => req = req.json(&json),
                (_, _, Some(raw)) => {
                    req = req.bytes(raw.as_bytes().into()).content_type("application/json");
                }
                _ => {}
            }

            for (k, v) in action.query_params {
                req = req.add_query_param(&k, v);
            }

            let resp = req.await;
            resp.assert_status(action.expect);
            let cookies = resp.cookies();

            for (cookie_name, check) in action.cookie_asserts {
                let cookie = cookies
                    .get(cookie_name)
                    .unwrap_or_else(|| panic!("Cookie {} is not set", cookie_name));
                check(cookie);
            }

            if !action.body_asserts.is_empty() {
                let body = resp.json::<Value>();
                for check in action.body_asserts {
                    check(&body);
                }
            }

            if let Some(save_key) = action.save_as {
                ctx.store(save_key, resp.json::<Value>());
            }
        }
        ctx
    }
}

// Common actions builders

#[allow(unused)]
pub fn signup_action(email: &str, password: &str) -> Action {
    Action::new("signup", "POST", "/api/v1/account/signup").with_body(json!({
        "email": email,
        "password": password,
        "fullName": "Test Learner",
        "jobTitle": "Technician",
    }))
}

#[allow(unused)]
pub fn signin_action(email: &str, password: &str) -> Action {
    Action::new("signin", "POST", "/api/v1/account/signin").with_body(json!({
        "email": email,
        "password": password,
    }))
}

/// Creates a staff account directly in the store; sign in with `signin_action`.
#[allow(unused)]
pub async fn create_staff(store: &MemoryStore, email: &str, password: &str, role: UserRole) {
    store
        .create_user(UserEntityCreate {
            email: email.to_string(),
            full_name: String::from("Site Supervisor"),
            password_hash: hash_password(password).unwrap(),
            role,
            job_title: String::from("EHS Manager"),
        })
        .await
        .unwrap();
}

/// Signs up a fresh learner and stores the envelope under `"me"`.
#[allow(unused)]
pub fn learner_action() -> Action {
    signup_action("learner@plant.example", "hunter22").with_save_as("me")
}
