/// Events emitted by the aggregation engine after a result is committed.
///
/// Consumers (the notification dispatcher in the API crate) receive these on an
/// unbounded channel. An event is only sent once the result it describes is
/// durable, so a consumer never observes a result that was rolled back.

use serde::{Deserialize, Serialize};

use crate::eligibility::Eligibility;
use crate::models::StudentKey;
use crate::models::result::{Model as ResultModel, PassStatus, SubjectMark};

/// Everything a student needs to be told about a finalized result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultNotification {
    pub student_email: String,
    pub student_name: String,
    pub register_number: String,
    pub semester: String,
    pub branch: String,
    pub subjects: Vec<SubjectMark>,
    pub total_marks: i32,
    pub percentage: f64,
    pub pass_status: PassStatus,
    pub attendance_eligibility: Eligibility,
}

impl From<&ResultModel> for ResultNotification {
    fn from(result: &ResultModel) -> Self {
        Self {
            student_email: result.student_email.clone(),
            student_name: result.student_name.clone(),
            register_number: result.register_number.clone(),
            semester: result.semester.clone(),
            branch: result.branch.clone(),
            subjects: result.subjects.0.clone(),
            total_marks: result.total_marks,
            percentage: result.percentage,
            pass_status: result.pass_status,
            attendance_eligibility: result.attendance_eligibility,
        }
    }
}

impl ResultNotification {
    pub fn key(&self) -> StudentKey {
        StudentKey::new(&self.register_number, &self.semester, &self.branch)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ResultEvent {
    /// A complete result was created or recomputed
    Finalized(ResultNotification),
}

impl ResultEvent {
    pub fn notification(&self) -> &ResultNotification {
        match self {
            ResultEvent::Finalized(n) => n,
        }
    }

    /// Get the event type string for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            ResultEvent::Finalized(_) => "result_finalized",
        }
    }
}
