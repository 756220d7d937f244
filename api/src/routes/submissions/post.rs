use axum::{Json, extract::State};
use db::models::submission::{Model as Submission, NewSubmission};

use crate::auth::claims::AuthUser;
use crate::response::{ApiResult, created};
use crate::state::AppState;

/// POST /api/submissions
///
/// Records a sessional mark as `pending`. The reporting lecturer is taken from
/// the token, never from the body.
///
/// ### Request Body
/// ```json
/// {
///   "register_number": "21CS001",
///   "semester": "S1",
///   "branch": "CSE",
///   "subject_name": "Maths",
///   "sessional_type": "sessional_1",
///   "marks": 78,
///   "attendance_percent": 82,
///   "student_name": "Asha",
///   "student_email": "asha@example.com"
/// }
/// ```
///
/// ### Errors
/// - 400 Bad Request: missing identity fields, invalid email, or marks/attendance outside 0..=100
pub async fn create_submission(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut req): Json<NewSubmission>,
) -> ApiResult<Submission> {
    req.lecturer_id = user.lecturer_id();

    let submission = Submission::create(state.db(), req).await?;
    created(submission, "Submission recorded")
}
