use axum::extract::{Query, State};
use db::models::result::Model as StudentResult;
use util::retry::retry_read;

use crate::response::{ApiError, ApiResult, ok};
use crate::routes::results::common::StudentResultQuery;
use crate::state::AppState;

/// GET /api/results
///
/// Every finalized result, ordered by register number, semester and branch.
pub async fn list_results(State(state): State<AppState>) -> ApiResult<Vec<StudentResult>> {
    let results = retry_read("list_results", || StudentResult::list_all(state.db())).await?;
    ok(results, "Results retrieved successfully")
}

/// GET /api/results/student?register_number=21CS001&semester=S1
///
/// Public student view. Only finalized results exist, so an empty list means
/// nothing has been published yet. `semester` is optional.
pub async fn student_results(
    State(state): State<AppState>,
    Query(query): Query<StudentResultQuery>,
) -> ApiResult<Vec<StudentResult>> {
    let register_number = query.register_number.trim();
    if register_number.is_empty() {
        return Err(ApiError::bad_request("register_number is required"));
    }
    let semester = query
        .semester
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let results = retry_read("student_results", || {
        StudentResult::find_by_register_number(state.db(), register_number, semester)
    })
    .await?;

    ok(results, "Results retrieved successfully")
}
