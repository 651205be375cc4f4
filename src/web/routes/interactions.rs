use axum::{Router, extract::State, response::IntoResponse, routing::post};

use crate::{
    model::{ResourceTyped, check_access, entity::ContentInteraction},
    web::{
        AppState, AuthenticatedUser, WebError, WebResult,
        dto::interaction::ContentInteractionBody,
        envelope::{Created, Envelope, ErrorEnvelope},
        extract::ApiJson,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(record_interaction_handler))
}

#[utoipa::path(
    post,
    path = "/api/v1/content-interactions",
    request_body = ContentInteractionBody,
    description = "Records a view, click or other interaction with a block",
    responses(
        (status = 201, description = "Interaction recorded", body = Envelope<ContentInteraction>),
        (status = 400, description = "Missing required fields", body = ErrorEnvelope),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 403, description = "Interaction belongs to another user", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "interactions",
    security(("cookie" = []))
)]
pub async fn record_interaction_handler(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ContentInteractionBody>,
) -> WebResult<impl IntoResponse> {
    let create = body.validate()?;
    check_access(&user, &create)
        .map_err(|e| WebError::resource_fetch_error(ContentInteraction::get_resource_type(), e))?;

    let interaction = state
        .store()
        .insert_interaction(create)
        .await
        .map_err(|e| WebError::resource_fetch_error(ContentInteraction::get_resource_type(), e))?;

    Ok(Created(interaction))
}
