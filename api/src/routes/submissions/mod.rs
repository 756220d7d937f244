//! # Submissions Routes Module
//!
//! Routes for `/submissions`. Lecturers report marks and see their own
//! submissions; administrators review the queue and approve or reject.
//!
//! ## Structure
//! - `post.rs`: lecturer submission
//! - `get.rs`: lecturer dashboard, pending queue and key lookup
//! - `put.rs`: approve / reject

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::auth::guards::{allow_admin, allow_lecturer};
use crate::state::AppState;
use get::{list_my_submissions, list_pending, list_submissions};
use post::create_submission;
use put::{approve_submission, reject_submission};

/// - `POST /submissions` → `create_submission` (lecturer)
/// - `GET /submissions/mine` → `list_my_submissions` (lecturer)
/// - `GET /submissions` → `list_submissions` (admin)
/// - `GET /submissions/pending` → `list_pending` (admin)
/// - `PUT /submissions/{submission_id}/approve` → `approve_submission` (admin)
/// - `PUT /submissions/{submission_id}/reject` → `reject_submission` (admin)
pub fn submissions_routes(app_state: AppState) -> Router<AppState> {
    let lecturer = Router::new()
        .route("/", post(create_submission))
        .route("/mine", get(list_my_submissions))
        .route_layer(from_fn_with_state(app_state.clone(), allow_lecturer));

    let admin = Router::new()
        .route("/", get(list_submissions))
        .route("/pending", get(list_pending))
        .route("/{submission_id}/approve", put(approve_submission))
        .route("/{submission_id}/reject", put(reject_submission))
        .route_layer(from_fn_with_state(app_state, allow_admin));

    lecturer.merge(admin)
}
