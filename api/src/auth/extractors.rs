use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::auth::claims::{AuthUser, Claims};
use crate::state::AppState;

/// Decodes the bearer token in `parts` with `key`.
pub async fn decode_bearer(
    parts: &mut Parts,
    key: &DecodingKey,
) -> Result<AuthUser, (StatusCode, &'static str)> {
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, &())
            .await
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Missing or invalid Authorization header"))?;

    let token_data = decode::<Claims>(bearer.token(), key, &Validation::new(Algorithm::HS256))
        .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

    Ok(AuthUser(token_data.claims))
}

/// Extracts `AuthUser` from a valid `Authorization: Bearer` header.
///
/// Rejects with `401 Unauthorized` if the header is missing or malformed, or
/// the token is invalid or expired.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        decode_bearer(parts, state.decoding_key()).await
    }
}
