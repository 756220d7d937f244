use axum::extract::{Path, State};
use db::error::DomainError;
use db::models::result::Model as StudentResult;

use crate::response::{ApiResult, Empty, ok};
use crate::state::AppState;

/// DELETE /api/results/{result_id}
///
/// Removes a result. Submissions are kept; a later approval for the same
/// student rebuilds it.
///
/// ### Errors
/// - 404 Not Found: unknown result
pub async fn delete_result(
    State(state): State<AppState>,
    Path(result_id): Path<i64>,
) -> ApiResult<Empty> {
    if !StudentResult::delete_by_id(state.db(), result_id).await? {
        return Err(DomainError::result_not_found(result_id).into());
    }

    tracing::info!(result_id, "Result deleted");
    ok(Empty::default(), "Result deleted successfully")
}
