use db::models::result::Model as StudentResult;
use db::models::submission::{Model as Submission, SubmissionStatus};
use serde::{Deserialize, Serialize};

/// Query for `GET /submissions`.
#[derive(Debug, Deserialize)]
pub struct SubmissionQuery {
    pub register_number: String,
    pub semester: String,
    pub branch: String,
    pub status: Option<SubmissionStatus>,
}

#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    pub submission: Submission,
    /// Present once every expected subject is approved.
    pub result: Option<StudentResult>,
    pub complete: bool,
}
