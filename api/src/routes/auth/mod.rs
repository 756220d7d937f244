//! # auth Routes Module
//!
//! Public login endpoints for the `/auth` group. Both return a bearer token.

pub mod common;
pub mod post;

use axum::{Router, routing::post};

use crate::state::AppState;
use post::{admin_login, lecturer_login};

/// - `POST /auth/admin/login` → `admin_login`
/// - `POST /auth/lecturer/login` → `lecturer_login`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(admin_login))
        .route("/lecturer/login", post(lecturer_login))
}
