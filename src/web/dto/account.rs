use serde::{Deserialize, Serialize};

use super::{missing, present};
use crate::web::{WebError, WebResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Signup {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub job_title: String,
}

impl SignupBody {
    pub fn validate(self) -> WebResult<Signup> {
        match (
            present(self.email),
            present(self.password),
            present(self.full_name),
        ) {
            (Some(email), Some(password), Some(full_name)) => Ok(Signup {
                email: email.trim().to_lowercase(),
                password,
                full_name,
                job_title: self.job_title.unwrap_or_default(),
            }),
            (email, password, full_name) => Err(WebError::missing_fields(missing(&[
                ("email", email.is_none()),
                ("password", password.is_none()),
                ("fullName", full_name.is_none()),
            ]))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SigninBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl SigninBody {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Returns `(email, password)`.
    pub fn validate(self) -> WebResult<(String, String)> {
        match (present(self.email), present(self.password)) {
            (Some(email), Some(password)) => Ok((email.trim().to_lowercase(), password)),
            (email, password) => Err(WebError::missing_fields(missing(&[
                ("email", email.is_none()),
                ("password", password.is_none()),
            ]))),
        }
    }
}
