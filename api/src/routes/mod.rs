//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness (public)
//! - `/auth` → admin and lecturer login (public)
//! - `/lecturers` → lecturer accounts and statistics (admin)
//! - `/submissions` → mark reporting (lecturer) and approval (admin)
//! - `/results` → student lookup (public), listing, deletion and import (admin)
//! - `/admin` → dashboard and analytics (admin)

use axum::{Router, middleware::from_fn_with_state};

use crate::auth::guards::allow_admin;
use crate::routes::{
    admin::admin_routes, auth::auth_routes, health::health_routes,
    lecturers::lecturers_routes, results::results_routes, submissions::submissions_routes,
};
use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod health;
pub mod lecturers;
pub mod results;
pub mod submissions;

/// Builds the application router for all HTTP endpoints.
///
/// Guards that need `AppState` are attached here; call `.with_state(..)` on
/// the router this is nested into.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/lecturers",
            lecturers_routes().route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .nest("/submissions", submissions_routes(app_state.clone()))
        .nest("/results", results_routes(app_state.clone()))
        .nest(
            "/admin",
            admin_routes().route_layer(from_fn_with_state(app_state, allow_admin)),
        )
}
