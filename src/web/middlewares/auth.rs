use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{
    auth,
    model::{ResourceTyped, entity::UserEntity},
    web::{AppState, RequestContext, context::AuthenticatedUser, error::WebError},
};

pub static AUTH_TOKEN: &str = "SID";

/// Resolves the `SID` cookie into a [`RequestContext`]. A missing, expired or
/// unparsable token, or one naming an unknown user, yields an anonymous
/// context; guarded handlers turn that into 401.
pub async fn extract_context_fn(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let ctx = match cookies.get(AUTH_TOKEN) {
        Some(token) => resolve_session(&state, token.value()).await?,
        None => RequestContext::anonymous(),
    };

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

async fn resolve_session(state: &AppState, token: &str) -> Result<RequestContext, WebError> {
    let claims = match auth::process_token(token, state.config().app().jwt()) {
        Ok(data) => data.claims,
        Err(e) => {
            tracing::debug!("ignoring invalid session cookie: {}", e);
            return Ok(RequestContext::anonymous());
        }
    };

    let Ok(id) = claims.sub.parse::<uuid::Uuid>() else {
        tracing::debug!("session cookie has a malformed subject");
        return Ok(RequestContext::anonymous());
    };

    let user = state
        .store()
        .find_user_by_id(id)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    Ok(match user {
        Some(user) => RequestContext::new(Some(AuthenticatedUser::new(id, user.role()))),
        None => RequestContext::anonymous(),
    })
}
