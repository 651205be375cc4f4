use axum::{Router, extract::State, response::IntoResponse, routing::get};

use crate::{
    model::{ResourceTyped, entity::UserEntity},
    navigation::{MenuEntry, items_for},
    web::{
        AppState, AuthenticatedUser, WebError, WebResult,
        dto::dashboard::DashboardSummary,
        envelope::{Envelope, ErrorEnvelope},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/navigation", get(navigation_handler))
        .route("/dashboard", get(dashboard_handler))
}

#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    description = "Main menu entries visible to the caller's role",
    responses(
        (status = 200, description = "Menu entries", body = Envelope<Vec<MenuEntry>>),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
    ),
    tag = "navigation",
    security(("cookie" = []))
)]
pub async fn navigation_handler(user: AuthenticatedUser) -> impl IntoResponse {
    Envelope::ok(items_for(user.user_role()))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    description = "Counts shown on the caller's dashboard",
    responses(
        (status = 200, description = "Summary", body = Envelope<DashboardSummary>),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "navigation",
    security(("cookie" = []))
)]
pub async fn dashboard_handler(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let store = state.store();
    let id = user.user_id();

    let (found, total_courses, completed_sections, total_answers, correct_answers) = tokio::try_join!(
        store.find_user_by_id(id),
        store.count_courses(),
        store.count_completed_sections(id),
        store.count_quiz_attempts(id),
        store.count_correct_attempts(id),
    )
    .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    let found = found.ok_or(WebError::resource_not_found(UserEntity::get_resource_type()))?;

    Ok(Envelope::ok(DashboardSummary::new(
        found.full_name().to_string(),
        total_courses,
        completed_sections,
        total_answers,
        correct_answers,
    )))
}
