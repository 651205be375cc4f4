use crate::web::{AppState, doc::ApiDoc, middlewares::auth::extract_context_fn};
use axum::{Router, middleware};
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod account;
pub mod dashboard;
pub mod interactions;
pub mod learning;
pub mod progress;
pub mod public;
pub mod quiz_attempts;
pub mod users;

pub fn build_app(state: AppState) -> Router {
    let docs = state.config().app().docs();

    let mut router = Router::new()
        .nest("/api/v1/account", account::routes())
        .nest("/api/v1/public", public::routes())
        .nest("/api/v1/quiz-attempts", quiz_attempts::routes())
        .nest("/api/v1/user-progress", progress::routes())
        .nest("/api/v1/content-interactions", interactions::routes())
        .nest("/api/v1/users", users::routes())
        .nest("/api/v1/courses", learning::routes())
        .nest("/api/v1", dashboard::routes())
        .layer(middleware::from_fn_with_state(state.clone(), extract_context_fn))
        .layer(CookieManagerLayer::default())
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    if docs {
        let openapi = ApiDoc::openapi();

        router = router.merge(SwaggerUi::new("/api/v1/docs").url("/api-doc/openapi.json", openapi));
    }

    router
}
