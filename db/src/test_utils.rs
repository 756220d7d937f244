use migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::models::submission::{NewSubmission, SessionalType};

/// Fresh in-memory database with every migration applied.
///
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// A valid submission for student key `(register_number, "S1", "CSE")` with 80% attendance.
pub fn new_submission(register_number: &str, subject_name: &str, marks: i64) -> NewSubmission {
    NewSubmission {
        lecturer_id: None,
        register_number: register_number.to_owned(),
        semester: "S1".to_owned(),
        branch: "CSE".to_owned(),
        subject_name: subject_name.to_owned(),
        sessional_type: SessionalType::Final,
        marks,
        attendance_percent: 80,
        student_name: "Asha".to_owned(),
        student_email: "asha@example.com".to_owned(),
    }
}
