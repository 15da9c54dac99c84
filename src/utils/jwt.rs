use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

/// JWT Claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,   // Username
    pub uid: i32,      // Admin ID
    pub roles: String, // Comma-joined authority strings, e.g. "ROLE_ADMIN"
    pub iat: usize,    // Issued-at timestamp
    pub exp: usize,    // Expiration timestamp
}

/// Sign a new JWT token for an admin account.
pub fn sign(admin_id: i32, username: &str, role: &str, secret: &str, ttl_secs: u64) -> Result<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(ttl_secs as i64))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: username.to_owned(),
        uid: admin_id,
        roles: role.to_owned(),
        iat: now.timestamp() as usize,
        exp: expiration as usize,
    };

    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a JWT token.
///
/// Each failure mode is logged separately; callers collapse them all to a
/// single 401 outward.
pub fn verify(token: &str, secret: &str) -> Result<Claims> {
    let result = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS512),
    );

    match result {
        Ok(token_data) => Ok(token_data.claims),
        Err(e) => {
            match e.kind() {
                ErrorKind::InvalidSignature => tracing::debug!("Rejected JWT: bad signature"),
                ErrorKind::ExpiredSignature => tracing::debug!("Rejected JWT: expired"),
                ErrorKind::InvalidAlgorithm => tracing::debug!("Rejected JWT: unsupported algorithm"),
                other => tracing::debug!("Rejected JWT: malformed ({:?})", other),
            }
            Err(e.into())
        }
    }
}
