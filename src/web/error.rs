use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::{
    auth::CryptError,
    error::log_error,
    model::{DatabaseError, ResourceType},
    web::envelope::Envelope,
};

pub type WebResult<T> = std::result::Result<T, WebError>;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("RegistrationUserConflict")]
    RegistrationUserConflict,
}

#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("AuthenticationRequired")]
    AuthenticationRequired,

    #[error("AuthenticationInvalidCredentials")]
    AuthenticationInvalidCredentials,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("RequestMissingFields: {fields:?}")]
    RequestMissingFields { fields: Vec<&'static str> },

    #[error("RequestInvalidField: {field}. Reason: {reason}")]
    RequestInvalidField { field: &'static str, reason: String },

    #[error("RequestMalformed: {reason}")]
    RequestMalformed { reason: String },
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("ResourceNotFound: {resource_type:?}")]
    ResourceNotFound { resource_type: ResourceType },

    #[error("ResourceForbidden: {resource_type:?}")]
    ResourceForbidden { resource_type: ResourceType },

    #[error("ResourceFetchError: {resource_type:?}. Error: {error}")]
    ResourceFetchError {
        resource_type: ResourceType,
        error: DatabaseError,
    },
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("ServerCryptError: {0}")]
    ServerCryptError(#[from] crate::auth::CryptError),
    #[error("ServerLearningError: {0}")]
    ServerLearningError(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn client_display(&self) -> String {
        String::from("Internal server error")
    }
}

impl RegistrationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::RegistrationUserConflict => StatusCode::CONFLICT,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::RegistrationUserConflict => String::from("User already exists"),
        }
    }
}

impl AuthenticationError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::AuthenticationRequired => String::from("Unauthorized"),
            Self::AuthenticationInvalidCredentials => String::from("Invalid email or password"),
        }
    }
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::RequestMissingFields { fields } => {
                format!("Missing required fields: {}", fields.join(", "))
            }
            Self::RequestInvalidField { field, reason } => format!("Invalid {field}: {reason}"),
            Self::RequestMalformed { reason } => format!("Invalid request: {reason}"),
        }
    }
}

fn capitalized(resource_type: ResourceType) -> String {
    let name = resource_type.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            Self::ResourceForbidden { .. } => StatusCode::FORBIDDEN,
            Self::ResourceFetchError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceNotFound { resource_type } => {
                format!("{} not found", capitalized(*resource_type))
            }
            Self::ResourceForbidden { .. } => String::from("Forbidden"),
            Self::ResourceFetchError { .. } => String::from("Internal server error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("ResourceError - {0}")]
    ResourceError(#[from] ResourceError),
    #[error("AuthenticationError - {0}")]
    AuthenticationError(#[from] AuthenticationError),
    #[error("RegistrationError - {0}")]
    RegistrationError(#[from] RegistrationError),
    #[error("RequestError - {0}")]
    RequestError(#[from] RequestError),
    #[error("ServerError - {0}")]
    ServerError(#[from] ServerError),
}

impl WebError {
    pub fn resource_not_found(r#type: ResourceType) -> Self {
        Self::ResourceError(ResourceError::ResourceNotFound {
            resource_type: r#type,
        })
    }

    pub fn resource_forbidden(r#type: ResourceType) -> Self {
        Self::ResourceError(ResourceError::ResourceForbidden {
            resource_type: r#type,
        })
    }

    /// `Forbidden` from the model layer keeps its 403; everything else is a
    /// backend failure.
    pub fn resource_fetch_error(r#type: ResourceType, error: DatabaseError) -> Self {
        match error {
            DatabaseError::Forbidden => Self::resource_forbidden(r#type),
            error => Self::ResourceError(ResourceError::ResourceFetchError {
                resource_type: r#type,
                error,
            }),
        }
    }

    pub fn missing_fields(fields: Vec<&'static str>) -> Self {
        Self::RequestError(RequestError::RequestMissingFields { fields })
    }

    pub fn invalid_field<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self::RequestError(RequestError::RequestInvalidField {
            field,
            reason: reason.into(),
        })
    }

    pub fn malformed_request<S: Into<String>>(reason: S) -> Self {
        Self::RequestError(RequestError::RequestMalformed {
            reason: reason.into(),
        })
    }

    pub fn auth_required() -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationRequired)
    }

    pub fn auth_invalid_credentials() -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationInvalidCredentials)
    }

    pub fn registration_conflict() -> Self {
        Self::RegistrationError(RegistrationError::RegistrationUserConflict)
    }

    pub fn server_crypt_error(e: CryptError) -> Self {
        Self::ServerError(ServerError::ServerCryptError(e))
    }

    pub fn server_learning_error<S: Into<String>>(reason: S) -> Self {
        Self::ServerError(ServerError::ServerLearningError(reason.into()))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ResourceError(e) => e.status_code(),
            Self::RegistrationError(e) => e.status_code(),
            Self::AuthenticationError(e) => e.status_code(),
            Self::RequestError(e) => e.status_code(),
            Self::ServerError(e) => e.status_code(),
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceError(e) => e.client_display(),
            Self::RegistrationError(e) => e.client_display(),
            Self::AuthenticationError(e) => e.client_display(),
            Self::RequestError(e) => e.client_display(),
            Self::ServerError(e) => e.client_display(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            log_error(&self);
        } else {
            tracing::debug!("request rejected: {}", self);
        }

        (status_code, Envelope::<()>::failure(self.client_display())).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_fields_message_lists_fields() {
        let e = WebError::missing_fields(vec!["userId", "userAnswer"]);
        assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(e.client_display(), "Missing required fields: userId, userAnswer");
    }

    #[test]
    fn fetch_error_hides_details() {
        let e = WebError::resource_fetch_error(ResourceType::QuizAttempt, DatabaseError::Unavailable);
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.client_display(), "Internal server error");
    }

    #[test]
    fn forbidden_database_error_stays_forbidden() {
        let e = WebError::resource_fetch_error(ResourceType::UserProgress, DatabaseError::Forbidden);
        assert_eq!(e.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn not_found_names_resource() {
        let e = WebError::resource_not_found(ResourceType::CourseSection);
        assert_eq!(e.client_display(), "Course section not found");
    }
}
