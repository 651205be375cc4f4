use axum::{Router, extract::State, response::IntoResponse, routing::get};

use crate::{
    model::{Page, ResourceTyped, entity::UserEntity},
    web::{
        AppState, AuthenticatedUser, WebError, WebResult,
        dto::users::UsersQuery,
        envelope::{Envelope, ErrorEnvelope},
        extract::ApiQuery,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(users_handler))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UsersQuery),
    description = "User directory for admins and managers",
    responses(
        (status = 200, description = "Requested page", body = Envelope<Page<UserEntity>>),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 403, description = "Not an admin or manager", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "users",
    security(("cookie" = []))
)]
pub async fn users_handler(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UsersQuery>,
) -> WebResult<impl IntoResponse> {
    if !user.is_staff() {
        return Err(WebError::resource_forbidden(UserEntity::get_resource_type()));
    }

    let users = state
        .store()
        .list_users()
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let filtered: Vec<UserEntity> = users
        .into_iter()
        .filter(|u| search.is_none_or(|term| u.matches_search(term)))
        .filter(|u| query.role.is_none_or(|role| u.role() == role))
        .collect();

    Ok(Envelope::ok(Page::slice(filtered, query.limit(), query.offset())))
}
