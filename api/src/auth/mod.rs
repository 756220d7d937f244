pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use chrono::{Duration, Utc};
use jsonwebtoken::{Header, encode};

use crate::state::AppState;

/// Generates a JWT and its expiry timestamp (RFC 3339).
pub fn generate_jwt(
    state: &AppState,
    subject: i64,
    admin: bool,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let expiry = Utc::now() + Duration::minutes(state.jwt_duration_minutes());

    let claims = Claims {
        sub: subject,
        admin,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, state.encoding_key())?;
    Ok((token, expiry.to_rfc3339()))
}
