use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use db::models::lecturer;
use sea_orm::EntityTrait;

use crate::auth::claims::AuthUser;
use crate::auth::extractors::decode_bearer;
use crate::response::ApiError;
use crate::state::AppState;

/// Helper to validate the bearer token and insert the `AuthUser` into the request extensions.
async fn extract_and_insert_authuser(
    state: &AppState,
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), ApiError> {
    let (mut parts, body) = req.into_parts();
    let user = decode_bearer(&mut parts, state.decoding_key())
        .await
        .map_err(|_| ApiError::unauthorized("Authentication required"))?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Admin-only guard.
pub async fn allow_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let (req, user) = extract_and_insert_authuser(&state, req).await?;

    if !user.0.admin {
        return Err(ApiError::forbidden("Admin access required"));
    }

    Ok(next.run(req).await)
}

/// Lecturer-only guard. The lecturer account must still exist.
pub async fn allow_lecturer(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let (req, user) = extract_and_insert_authuser(&state, req).await?;

    let Some(lecturer_id) = user.lecturer_id() else {
        return Err(ApiError::forbidden("Lecturer access required"));
    };

    match lecturer::Entity::find_by_id(lecturer_id).one(state.db()).await {
        Ok(Some(_)) => Ok(next.run(req).await),
        Ok(None) => Err(ApiError::unauthorized("Lecturer account no longer exists")),
        Err(e) => {
            // Deny on DB error
            tracing::warn!(error = %e, lecturer_id, "DB error while checking lecturer; denying access");
            Err(ApiError::internal("Database error"))
        }
    }
}
