use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for admin login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Username of the admin account.
    #[schema(example = "admin")]
    pub username: String,
    /// Account password.
    #[schema(example = "admin1234!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Signed JWT bearer token.
    #[serde(rename = "accessToken")]
    #[schema(example = "eyJhbGciOiJIUzUxMiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
}
