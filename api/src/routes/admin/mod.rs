//! # Admin Routes Module
//!
//! Read-only overview endpoints under `/admin`. Admin-only; the guard is
//! applied where the group is mounted.

pub mod common;
pub mod get;

use axum::{Router, routing::get};

use crate::state::AppState;
use get::{analytics, dashboard};

/// - `GET /admin/dashboard` → `dashboard`
/// - `GET /admin/analytics` → `analytics`
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/analytics", get(analytics))
}
