use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub struct CookieAuthModifier;

impl Modify for CookieAuthModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(schema) = openapi.components.as_mut() {
            schema.add_security_scheme(
                "cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "SID",
                    "JWT session token for the current user",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::routes::account::signup_handler,
        crate::web::routes::account::signin_handler,
        crate::web::routes::account::signout_handler,
        crate::web::routes::account::me_handler,
        crate::web::routes::public::courses_handler,
        crate::web::routes::public::course_sections_handler,
        crate::web::routes::public::section_html_handler,
        crate::web::routes::public::content_blocks_handler,
        crate::web::routes::public::quiz_questions_handler,
        crate::web::routes::public::design_tokens_handler,
        crate::web::routes::quiz_attempts::create_attempt_handler,
        crate::web::routes::quiz_attempts::list_attempts_handler,
        crate::web::routes::progress::upsert_progress_handler,
        crate::web::routes::progress::list_progress_handler,
        crate::web::routes::interactions::record_interaction_handler,
        crate::web::routes::dashboard::navigation_handler,
        crate::web::routes::dashboard::dashboard_handler,
        crate::web::routes::users::users_handler,
        crate::web::routes::learning::learning_handler,
    ),
    modifiers(&CookieAuthModifier),
    tags(
        (name = "account", description = "Sign up, sign in and the current session"),
        (name = "public", description = "Published course content, readable without a session"),
        (name = "learning", description = "Prepared course view for the learner"),
    )
)]
pub struct ApiDoc;
