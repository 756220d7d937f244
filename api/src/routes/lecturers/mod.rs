//! # Lecturers Routes Module
//!
//! Lecturer account management under `/lecturers`. Every route is admin-only;
//! the guard is applied where the group is mounted.

pub mod common;
pub mod get;
pub mod post;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;
use get::{lecturer_stats, list_lecturers};
use post::create_lecturer;

/// - `POST /lecturers` → `create_lecturer`
/// - `GET /lecturers` → `list_lecturers`
/// - `GET /lecturers/stats` → `lecturer_stats`
pub fn lecturers_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lecturer))
        .route("/", get(list_lecturers))
        .route("/stats", get(lecturer_stats))
}
