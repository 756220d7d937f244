use std::sync::Arc;

use api::auth::claims::ADMIN_SUBJECT;
use api::auth::generate_jwt;
use api::routes::routes;
use api::state::AppState;
use axum::Router;
use db::engine::AggregationEngine;
use db::events::ResultEvent;
use db::models::lecturer::Model as LecturerModel;
use db::test_utils::setup_test_db;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use util::config::AppConfig;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const EXPECTED_SUBJECTS: usize = 4;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub events: UnboundedReceiver<ResultEvent>,
}

impl TestApp {
    pub async fn create_lecturer(&self, email: &str) -> LecturerModel {
        LecturerModel::create(self.state.db(), "Dr. Rao", email, "secret1")
            .await
            .expect("Failed to create lecturer")
    }
}

fn init_test_config() {
    // The global config is built from the environment on first access.
    unsafe {
        std::env::set_var("JWT_SECRET", "test-secret");
        std::env::set_var("ADMIN_PASSWORD", ADMIN_PASSWORD);
    }
    AppConfig::set_jwt_secret("test-secret");
    AppConfig::set_admin_credentials(ADMIN_USERNAME, ADMIN_PASSWORD);
}

/// Fresh database, engine and router, wired the way `main` wires them minus
/// the request logger and the email dispatcher.
pub async fn make_test_app() -> TestApp {
    init_test_config();

    let db = setup_test_db().await;
    let (tx, events) = mpsc::unbounded_channel();
    let engine = Arc::new(AggregationEngine::new(db.clone(), EXPECTED_SUBJECTS).with_events(tx));
    let state = AppState::new(db, engine);

    let router = Router::new()
        .nest("/api", routes(state.clone()))
        .with_state(state.clone());

    TestApp {
        router,
        state,
        events,
    }
}

pub fn admin_token(state: &AppState) -> String {
    generate_jwt(state, ADMIN_SUBJECT, true).unwrap().0
}

pub fn lecturer_token(state: &AppState, lecturer_id: i64) -> String {
    generate_jwt(state, lecturer_id, false).unwrap().0
}
