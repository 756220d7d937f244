use axum::{Json, extract::State};
use db::models::lecturer::Model as Lecturer;
use util::retry::retry_read;
use validator::Validate;

use crate::auth::claims::ADMIN_SUBJECT;
use crate::auth::generate_jwt;
use crate::response::{ApiError, ApiResult, ok};
use crate::routes::auth::common::{AdminLoginRequest, LecturerLoginRequest, LoginResponse};
use crate::state::AppState;

/// POST /api/auth/admin/login
///
/// Checks the configured administrator credentials.
///
/// ### Request Body
/// ```json
/// { "username": "admin", "password": "..." }
/// ```
///
/// ### Errors
/// - 400 Bad Request: missing fields
/// - 401 Unauthorized: wrong credentials
pub async fn admin_login(
    State(state): State<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> ApiResult<LoginResponse> {
    req.validate()?;

    if !state.is_admin_login(&req.username, &req.password) {
        tracing::warn!(username = %req.username, "Rejected admin login");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let (token, expires_at) = generate_jwt(&state, ADMIN_SUBJECT, true)
        .map_err(|e| ApiError::internal(format!("Token encoding failed: {e}")))?;

    ok(
        LoginResponse {
            token,
            expires_at,
            role: "admin",
            lecturer: None,
        },
        "Login successful",
    )
}

/// POST /api/auth/lecturer/login
///
/// ### Request Body
/// ```json
/// { "email": "rao@college.edu", "password": "..." }
/// ```
///
/// ### Errors
/// - 400 Bad Request: malformed email or missing password
/// - 401 Unauthorized: unknown email or wrong password
pub async fn lecturer_login(
    State(state): State<AppState>,
    Json(req): Json<LecturerLoginRequest>,
) -> ApiResult<LoginResponse> {
    req.validate()?;

    let lecturer = retry_read("lecturer_login", || {
        Lecturer::verify_credentials(state.db(), &req.email, &req.password)
    })
    .await?
    .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let (token, expires_at) = generate_jwt(&state, lecturer.id, false)
        .map_err(|e| ApiError::internal(format!("Token encoding failed: {e}")))?;

    ok(
        LoginResponse {
            token,
            expires_at,
            role: "lecturer",
            lecturer: Some(lecturer),
        },
        "Login successful",
    )
}
