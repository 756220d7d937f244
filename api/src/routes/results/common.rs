use db::models::result::Model as StudentResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct StudentResultQuery {
    pub register_number: String,
    pub semester: Option<String>,
}

/// Body of `POST /results/import`.
#[derive(Debug, Deserialize, Validate)]
pub struct ImportRequest {
    /// Base64-encoded CSV document.
    #[validate(length(min = 1, message = "csv_data is required"))]
    pub csv_data: String,
    /// Subject names; each is read from a `subject_<name>` column.
    #[validate(length(min = 1, message = "At least one subject is required"))]
    pub subjects: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub results: Vec<StudentResult>,
}
