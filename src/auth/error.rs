use thiserror::Error;

pub type CryptResult<T> = std::result::Result<T, CryptError>;

/// Password hashing and session token failures. A wrong password or an
/// expired token is not one of these; callers see those as plain outcomes.
#[derive(Debug, Error)]
pub enum CryptError {
    #[error("password hash error: {0}")]
    PasswordHashError(#[from] argon2::password_hash::Error),
    #[error("session token error: {0}")]
    SessionTokenError(#[from] jsonwebtoken::errors::Error),
}
