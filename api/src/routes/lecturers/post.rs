use axum::{Json, extract::State};
use db::models::lecturer::Model as Lecturer;
use validator::Validate;

use crate::response::{ApiError, ApiResult, created};
use crate::routes::lecturers::common::CreateLecturerRequest;
use crate::state::AppState;

/// POST /api/lecturers
///
/// Creates a lecturer account. Admin-only.
///
/// ### Request Body
/// ```json
/// { "name": "Dr. Rao", "email": "rao@college.edu", "password": "secret1" }
/// ```
///
/// ### Errors
/// - 400 Bad Request: validation failure
/// - 409 Conflict: email already registered
pub async fn create_lecturer(
    State(state): State<AppState>,
    Json(req): Json<CreateLecturerRequest>,
) -> ApiResult<Lecturer> {
    req.validate()?;

    if Lecturer::find_by_email(state.db(), &req.email).await?.is_some() {
        return Err(ApiError::conflict("A lecturer with this email already exists"));
    }

    match Lecturer::create(state.db(), &req.name, &req.email, &req.password).await {
        Ok(lecturer) => {
            tracing::info!(lecturer_id = lecturer.id, "Lecturer created");
            created(lecturer, "Lecturer created successfully")
        }
        Err(e) if e.to_string().contains("UNIQUE constraint failed") => Err(ApiError::conflict(
            "A lecturer with this email already exists",
        )),
        Err(e) => Err(e.into()),
    }
}
