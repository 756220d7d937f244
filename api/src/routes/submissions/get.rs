use axum::extract::{Query, State};
use db::models::StudentKey;
use db::models::submission::{Model as Submission, SubmissionStatus};
use util::retry::retry_read;

use crate::auth::claims::AuthUser;
use crate::response::{ApiError, ApiResult, ok};
use crate::routes::submissions::common::SubmissionQuery;
use crate::state::AppState;

/// GET /api/submissions/mine
///
/// Every submission the calling lecturer has reported, oldest first.
pub async fn list_my_submissions(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Vec<Submission>> {
    let lecturer_id = user
        .lecturer_id()
        .ok_or_else(|| ApiError::forbidden("Lecturer access required"))?;

    let submissions = retry_read("list_by_reporter", || {
        Submission::list_by_reporter(state.db(), lecturer_id)
    })
    .await?;

    ok(submissions, "Submissions retrieved successfully")
}

/// GET /api/submissions/pending
///
/// The approval queue, oldest first.
pub async fn list_pending(State(state): State<AppState>) -> ApiResult<Vec<Submission>> {
    let pending = retry_read("list_pending", || {
        Submission::list_by_status(state.db(), SubmissionStatus::Pending)
    })
    .await?;

    ok(pending, "Pending submissions retrieved successfully")
}

/// GET /api/submissions?register_number=..&semester=..&branch=..&status=..
///
/// Submissions for one student key in insertion order, optionally filtered by status.
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<SubmissionQuery>,
) -> ApiResult<Vec<Submission>> {
    let key = StudentKey::new(&query.register_number, &query.semester, &query.branch);
    if key.register_number.is_empty() || key.semester.is_empty() || key.branch.is_empty() {
        return Err(ApiError::bad_request(
            "register_number, semester and branch are required",
        ));
    }

    let submissions = retry_read("list_by_key", || {
        Submission::list_by_key(state.db(), &key, query.status)
    })
    .await?;

    ok(submissions, "Submissions retrieved successfully")
}
