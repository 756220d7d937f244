use std::collections::HashMap;

use axum::extract::State;
use db::models::lecturer::Model as Lecturer;
use db::models::submission::Model as Submission;
use util::retry::retry_read;

use crate::response::{ApiResult, ok};
use crate::routes::lecturers::common::LecturerStat;
use crate::state::AppState;

/// GET /api/lecturers
///
/// Lists lecturer accounts, oldest first. Password hashes are never serialized.
pub async fn list_lecturers(State(state): State<AppState>) -> ApiResult<Vec<Lecturer>> {
    let lecturers = retry_read("list_lecturers", || Lecturer::list_all(state.db())).await?;
    ok(lecturers, "Lecturers retrieved successfully")
}

/// GET /api/lecturers/stats
///
/// Number of submissions reported by each lecturer.
///
/// ```json
/// { "success": true, "data": [ { "lecturer_id": 1, "name": "Dr. Rao", "submissions": 12 } ] }
/// ```
pub async fn lecturer_stats(State(state): State<AppState>) -> ApiResult<Vec<LecturerStat>> {
    let counts = retry_read("reporter_stats", || Submission::reporter_stats(state.db())).await?;
    let names: HashMap<i64, String> =
        retry_read("list_lecturers", || Lecturer::list_all(state.db()))
            .await?
            .into_iter()
            .map(|l| (l.id, l.name))
            .collect();

    let stats = counts
        .into_iter()
        .map(|count| LecturerStat {
            name: count.lecturer_id.and_then(|id| names.get(&id).cloned()),
            lecturer_id: count.lecturer_id,
            submissions: count.submissions,
        })
        .collect();

    ok(stats, "Lecturer statistics retrieved successfully")
}
