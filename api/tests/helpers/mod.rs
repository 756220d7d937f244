pub mod app;

pub use app::{TestApp, admin_token, lecturer_token, make_test_app};
pub use request::{send, submission_payload};
