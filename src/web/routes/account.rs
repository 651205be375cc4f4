use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Duration;
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use uuid::Uuid;

use crate::{
    auth::{self, UserClaims, hash_password, verify_password},
    model::{ResourceTyped, entity::{UserEntity, UserEntityCreate}},
    web::{
        AppState, AuthenticatedUser, UserRole, WebError, WebResult,
        dto::account::{SigninBody, SignupBody},
        envelope::{Envelope, ErrorEnvelope},
        extract::ApiJson,
        middlewares::auth::AUTH_TOKEN,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup_handler))
        .route("/signin", post(signin_handler))
        .route("/signout", post(signout_handler))
        .route("/me", get(me_handler))
}

fn issue_session(state: &AppState, cookies: &Cookies, user_id: Uuid) -> WebResult<()> {
    let claims = UserClaims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now() + Duration::days(1)).timestamp(),
    };
    let token = auth::generate_token(claims, state.config().app().jwt())
        .map_err(|e| WebError::server_crypt_error(e.into()))?;

    let mut cookie = Cookie::new(AUTH_TOKEN, token);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookies.add(cookie);
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/account/signup",
    request_body = SignupBody,
    description = "Registers a learner account and opens a session",
    responses(
        (status = 200, description = "User created", body = Envelope<UserEntity>),
        (status = 400, description = "Missing required fields", body = ErrorEnvelope),
        (status = 409, description = "User already exists", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "account"
)]
#[tracing::instrument(skip_all)]
pub async fn signup_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    ApiJson(body): ApiJson<SignupBody>,
) -> WebResult<impl IntoResponse> {
    let signup = body.validate()?;

    let found = state
        .store()
        .find_user_by_email(&signup.email)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;
    if found.is_some() {
        return Err(WebError::registration_conflict());
    }

    let password_hash = hash_password(&signup.password).map_err(WebError::server_crypt_error)?;
    let created = state
        .store()
        .create_user(UserEntityCreate {
            email: signup.email,
            full_name: signup.full_name,
            password_hash,
            role: UserRole::User,
            job_title: signup.job_title,
        })
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    issue_session(&state, &cookies, created.id())?;
    tracing::info!("user {} registered", created.id());

    Ok(Envelope::ok(created))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/signin",
    request_body = SigninBody,
    description = "Opens a session for valid credentials",
    responses(
        (status = 200, description = "User signed in", body = Envelope<UserEntity>),
        (status = 400, description = "Missing required fields", body = ErrorEnvelope),
        (status = 401, description = "Credentials invalid", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "account"
)]
#[tracing::instrument(skip_all)]
pub async fn signin_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    ApiJson(body): ApiJson<SigninBody>,
) -> WebResult<impl IntoResponse> {
    let (email, password) = body.validate()?;

    let Some(found) = state
        .store()
        .find_user_by_email(&email)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?
    else {
        return Err(WebError::auth_invalid_credentials());
    };

    let is_verified = verify_password(found.hash(), &password).map_err(WebError::server_crypt_error)?;
    if !is_verified {
        return Err(WebError::auth_invalid_credentials());
    }

    issue_session(&state, &cookies, found.id())?;
    Ok(Envelope::ok(found))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/signout",
    description = "Clears the session cookie",
    responses((status = 200, description = "Signed out", body = Envelope<bool>)),
    tag = "account"
)]
pub async fn signout_handler(cookies: Cookies) -> impl IntoResponse {
    let mut cookie = Cookie::from(AUTH_TOKEN);
    cookie.set_path("/");
    cookies.remove(cookie);
    Envelope::ok(true)
}

#[utoipa::path(
    get,
    path = "/api/v1/account/me",
    description = "Returns the signed-in user",
    responses(
        (status = 200, description = "Current user", body = Envelope<UserEntity>),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    ),
    tag = "account",
    security(("cookie" = []))
)]
pub async fn me_handler(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let found = state
        .store()
        .find_user_by_id(user.user_id())
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(UserEntity::get_resource_type()))?;

    Ok(Envelope::ok(found))
}
