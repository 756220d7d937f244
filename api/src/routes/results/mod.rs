//! # Results Routes Module
//!
//! Finalized results under `/results`. The student lookup is public; listing,
//! deletion and bulk import are admin-only.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};

use crate::auth::guards::allow_admin;
use crate::state::AppState;
use delete::delete_result;
use get::{list_results, student_results};
use post::import_results;

/// - `GET /results/student` → `student_results` (public)
/// - `GET /results` → `list_results` (admin)
/// - `DELETE /results/{result_id}` → `delete_result` (admin)
/// - `POST /results/import` → `import_results` (admin)
pub fn results_routes(app_state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(list_results))
        .route("/{result_id}", delete(delete_result))
        .route("/import", post(import_results))
        .route_layer(from_fn_with_state(app_state, allow_admin));

    Router::new()
        .route("/student", get(student_results))
        .merge(admin)
}
