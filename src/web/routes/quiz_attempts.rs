use axum::{Router, extract::State, response::IntoResponse, routing::post};

use crate::{
    model::{ResourceTyped, check_access, entity::{QuizAttempt, QuizAttemptFilter}},
    web::{
        AppState, AuthenticatedUser, WebError, WebResult,
        dto::quiz::{QuizAttemptBody, QuizAttemptQuery},
        envelope::{Created, Envelope, ErrorEnvelope},
        extract::{ApiJson, ApiQuery},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(create_attempt_handler).get(list_attempts_handler))
}

#[utoipa::path(
    post,
    path = "/api/v1/quiz-attempts",
    request_body = QuizAttemptBody,
    description = "Records one answer to a quiz question",
    responses(
        (status = 201, description = "Attempt recorded", body = Envelope<QuizAttempt>),
        (status = 400, description = "Missing required fields", body = ErrorEnvelope),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 403, description = "Attempt belongs to another user", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "quiz",
    security(("cookie" = []))
)]
#[tracing::instrument(skip_all, fields(user = %user.user_id()))]
pub async fn create_attempt_handler(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<QuizAttemptBody>,
) -> WebResult<impl IntoResponse> {
    let create = body.validate()?;
    check_access(&user, &create)
        .map_err(|e| WebError::resource_fetch_error(QuizAttempt::get_resource_type(), e))?;

    let attempt = state
        .store()
        .insert_quiz_attempt(create)
        .await
        .map_err(|e| WebError::resource_fetch_error(QuizAttempt::get_resource_type(), e))?;

    Ok(Created(attempt))
}

#[utoipa::path(
    get,
    path = "/api/v1/quiz-attempts",
    params(QuizAttemptQuery),
    description = "Attempts newest first. Learners only see their own.",
    responses(
        (status = 200, description = "Attempts", body = Envelope<Vec<QuizAttempt>>),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 403, description = "Attempts of another user", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "quiz",
    security(("cookie" = []))
)]
pub async fn list_attempts_handler(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<QuizAttemptQuery>,
) -> WebResult<impl IntoResponse> {
    let mut filter = QuizAttemptFilter::from(query);
    if !user.is_staff() {
        match filter.user_id {
            Some(id) if id != user.user_id() => {
                return Err(WebError::resource_forbidden(QuizAttempt::get_resource_type()));
            }
            _ => filter.user_id = Some(user.user_id()),
        }
    }

    let attempts = state
        .store()
        .list_quiz_attempts(&filter)
        .await
        .map_err(|e| WebError::resource_fetch_error(QuizAttempt::get_resource_type(), e))?;

    Ok(Envelope::ok(attempts))
}
