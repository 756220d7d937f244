use axum::extract::{Path, State};
use db::models::submission::Model as Submission;

use crate::response::{ApiResult, ok};
use crate::routes::submissions::common::ApprovalResponse;
use crate::state::AppState;

/// PUT /api/submissions/{submission_id}/approve
///
/// Approves a pending submission and recomputes the student's result. The
/// result is only written once every expected subject has an approved mark.
/// Repeating an approval is harmless.
///
/// ### Errors
/// - 404 Not Found: unknown submission
/// - 409 Conflict: the submission was already rejected
pub async fn approve_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<i64>,
) -> ApiResult<ApprovalResponse> {
    let approval = state.engine().approve(submission_id).await?;

    let message = if approval.aggregation.complete {
        "Submission approved and result updated"
    } else {
        "Submission approved; result pending remaining subjects"
    };

    ok(
        ApprovalResponse {
            submission: approval.submission,
            result: approval.aggregation.result,
            complete: approval.aggregation.complete,
        },
        message,
    )
}

/// PUT /api/submissions/{submission_id}/reject
///
/// Rejects a pending submission. Results are never changed by a rejection.
///
/// ### Errors
/// - 404 Not Found: unknown submission
/// - 409 Conflict: the submission was already approved
pub async fn reject_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<i64>,
) -> ApiResult<Submission> {
    let submission = state.engine().reject(submission_id).await?;
    ok(submission, "Submission rejected")
}
