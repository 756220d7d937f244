use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLecturerRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Submission count for one lecturer. `lecturer_id` is `None` for submissions
/// whose lecturer account was removed.
#[derive(Debug, Serialize)]
pub struct LecturerStat {
    pub lecturer_id: Option<i64>,
    pub name: Option<String>,
    pub submissions: i64,
}
