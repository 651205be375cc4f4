use axum::{Router, extract::State, response::IntoResponse, routing::post};

use crate::{
    model::{ResourceTyped, check_access, entity::{ProgressFilter, UserProgress}},
    web::{
        AppState, AuthenticatedUser, WebError, WebResult,
        dto::progress::{UserProgressBody, UserProgressQuery},
        envelope::{Envelope, ErrorEnvelope},
        extract::{ApiJson, ApiQuery},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(upsert_progress_handler).get(list_progress_handler))
}

#[utoipa::path(
    post,
    path = "/api/v1/user-progress",
    request_body = UserProgressBody,
    description = "Creates or updates the caller's progress row for a section",
    responses(
        (status = 200, description = "Row stored", body = Envelope<UserProgress>),
        (status = 400, description = "Missing or invalid fields", body = ErrorEnvelope),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 403, description = "Row belongs to another user", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "progress",
    security(("cookie" = []))
)]
#[tracing::instrument(skip_all, fields(user = %user.user_id()))]
pub async fn upsert_progress_handler(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UserProgressBody>,
) -> WebResult<impl IntoResponse> {
    let upsert = body.validate()?;
    check_access(&user, &upsert)
        .map_err(|e| WebError::resource_fetch_error(UserProgress::get_resource_type(), e))?;

    let row = state
        .store()
        .upsert_progress(upsert)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserProgress::get_resource_type(), e))?;

    Ok(Envelope::ok(row))
}

#[utoipa::path(
    get,
    path = "/api/v1/user-progress",
    params(UserProgressQuery),
    description = "The caller's progress rows",
    responses(
        (status = 200, description = "Rows", body = Envelope<Vec<UserProgress>>),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "progress",
    security(("cookie" = []))
)]
pub async fn list_progress_handler(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserProgressQuery>,
) -> WebResult<impl IntoResponse> {
    let filter = ProgressFilter {
        user_id: Some(user.user_id()),
        course_id: query.course_id,
        section_id: query.section_id,
    };

    let rows = state
        .store()
        .list_progress(&filter)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserProgress::get_resource_type(), e))?;

    Ok(Envelope::ok(rows))
}
