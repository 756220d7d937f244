use axum::extract::State;
use db::models::StudentResult as ResultEntity;
use db::models::result::Model as StudentResult;
use db::models::submission::{Model as Submission, SubmissionStatus};
use sea_orm::{EntityTrait, PaginatorTrait};
use util::retry::retry_read;

use crate::response::{ApiResult, ok};
use crate::routes::admin::common::{AnalyticsResponse, DashboardResponse};
use crate::state::AppState;

/// GET /api/admin/dashboard
///
/// ```json
/// { "success": true, "data": { "total_results": 42, "pending_submissions": 7 } }
/// ```
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<DashboardResponse> {
    let total_results =
        retry_read("count_results", || ResultEntity::find().count(state.db())).await?;
    let pending_submissions = retry_read("count_pending", || {
        Submission::count_by_status(state.db(), SubmissionStatus::Pending)
    })
    .await?;

    ok(
        DashboardResponse {
            total_results,
            pending_submissions,
        },
        "Dashboard retrieved successfully",
    )
}

/// GET /api/admin/analytics
///
/// Pass/fail split and average percentage over all finalized results.
pub async fn analytics(State(state): State<AppState>) -> ApiResult<AnalyticsResponse> {
    let results = retry_read("list_results", || StudentResult::list_all(state.db())).await?;
    ok(
        AnalyticsResponse::from_results(&results),
        "Analytics retrieved successfully",
    )
}
