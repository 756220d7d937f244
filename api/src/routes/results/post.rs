use axum::{Json, extract::State};
use db::import::ImportSchema;
use validator::Validate;

use crate::response::{ApiResult, created};
use crate::routes::results::common::{ImportRequest, ImportResponse};
use crate::state::AppState;

/// POST /api/results/import
///
/// Bulk-imports results from a base64-encoded CSV document. Admin-only.
///
/// ### Request Body
/// ```json
/// { "csv_data": "bmFtZSxyZWdpc3Rlcl9udW1iZXIs...", "subjects": ["Maths", "Physics"] }
/// ```
///
/// Required columns: `name, register_number, semester, branch, attendance`
/// and one `subject_<name>` column per listed subject; `email` is optional.
/// `subjects` must name exactly the configured number of subjects, and each
/// student key may appear on one row only. Every row is validated first, so a
/// bad row rejects the whole document.
///
/// ### Errors
/// - 400 Bad Request: bad base64, missing columns, or invalid rows (all listed)
pub async fn import_results(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> ApiResult<ImportResponse> {
    req.validate()?;

    let schema = ImportSchema::new(&req.subjects)?;
    let rows = schema.parse_base64(&req.csv_data)?;
    let results = state.engine().import_results(rows).await?;

    created(
        ImportResponse {
            imported: results.len(),
            results,
        },
        "Results imported successfully",
    )
}
