//! Lecturer-reported sessional marks and their approval lifecycle.
//!
//! A submission starts `Pending` and moves exactly once to `Approved` or
//! `Rejected`. Status changes are a single conditional `UPDATE`, so two racing
//! transitions on the same row cannot both take effect.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use crate::eligibility::{Eligibility, classify};
use crate::error::{DomainError, DomainResult};
use crate::models::student_key::StudentKey;

/// Approval state of a submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SubmissionStatus {
    /// Waiting for an administrator
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Counts towards the student's result (terminal)
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Never counts (terminal)
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl SubmissionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }
}

/// Assessment round a mark was recorded for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum SessionalType {
    #[sea_orm(string_value = "sessional_1")]
    #[serde(rename = "sessional_1")]
    #[strum(serialize = "sessional_1")]
    Sessional1,
    #[sea_orm(string_value = "sessional_2")]
    #[serde(rename = "sessional_2")]
    #[strum(serialize = "sessional_2")]
    Sessional2,
    #[sea_orm(string_value = "final")]
    #[serde(rename = "final")]
    #[strum(serialize = "final")]
    Final,
}

/// One lecturer-reported subject mark for one student.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    /// Primary key; also the insertion order.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Reporting lecturer. Attribution only; cleared if the lecturer is removed.
    pub lecturer_id: Option<i64>,
    pub register_number: String,
    pub semester: String,
    pub branch: String,
    pub subject_name: String,
    pub sessional_type: SessionalType,
    /// Always within 0..=100.
    pub marks: i32,
    /// Always within 0..=100.
    pub attendance_percent: i32,
    /// Derived from `attendance_percent` on create.
    pub attendance_eligibility: Eligibility,
    pub status: SubmissionStatus,
    pub student_name: String,
    pub student_email: String,
    /// Set when the submission transitions to `Approved`.
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lecturer::Entity",
        from = "Column::LecturerId",
        to = "super::lecturer::Column::Id",
        on_delete = "SetNull"
    )]
    Lecturer,
}

impl Related<super::lecturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecturer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Input accepted by [`Model::create`].
///
/// Marks and attendance are wide integers so out-of-range values reach
/// validation instead of failing deserialization or wrapping.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSubmission {
    #[serde(default)]
    pub lecturer_id: Option<i64>,
    #[validate(length(min = 1, message = "Register number is required"))]
    pub register_number: String,
    #[validate(length(min = 1, message = "Semester is required"))]
    pub semester: String,
    #[validate(length(min = 1, message = "Branch is required"))]
    pub branch: String,
    #[validate(length(min = 1, message = "Subject name is required"))]
    pub subject_name: String,
    pub sessional_type: SessionalType,
    #[validate(range(min = 0, max = 100, message = "Marks must be between 0 and 100"))]
    pub marks: i64,
    #[validate(range(min = 0, max = 100, message = "Attendance must be between 0 and 100"))]
    pub attendance_percent: i64,
    #[validate(length(min = 1, message = "Student name is required"))]
    pub student_name: String,
    #[validate(email(message = "Invalid student email"))]
    pub student_email: String,
}

impl NewSubmission {
    fn trimmed(self) -> Self {
        Self {
            register_number: self.register_number.trim().to_owned(),
            semester: self.semester.trim().to_owned(),
            branch: self.branch.trim().to_owned(),
            subject_name: self.subject_name.trim().to_owned(),
            student_name: self.student_name.trim().to_owned(),
            student_email: self.student_email.trim().to_owned(),
            ..self
        }
    }
}

/// Submission count for one reporting lecturer.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct ReporterCount {
    pub lecturer_id: Option<i64>,
    pub submissions: i64,
}

impl Model {
    pub fn key(&self) -> StudentKey {
        StudentKey::new(&self.register_number, &self.semester, &self.branch)
    }

    /// Validates and stores a new `Pending` submission.
    ///
    /// Nothing is written when validation fails.
    pub async fn create(db: &DatabaseConnection, input: NewSubmission) -> DomainResult<Model> {
        let input = input.trimmed();
        input.validate()?;

        // Range-checked above, so the narrowing is lossless.
        let marks = input.marks as i32;
        let attendance_percent = input.attendance_percent as i32;
        let now = Utc::now();

        let active = ActiveModel {
            lecturer_id: Set(input.lecturer_id),
            register_number: Set(input.register_number),
            semester: Set(input.semester),
            branch: Set(input.branch),
            subject_name: Set(input.subject_name),
            sessional_type: Set(input.sessional_type),
            marks: Set(marks),
            attendance_percent: Set(attendance_percent),
            attendance_eligibility: Set(classify(attendance_percent)),
            status: Set(SubmissionStatus::Pending),
            student_name: Set(input.student_name),
            student_email: Set(input.student_email),
            approved_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = active.insert(db).await?;
        tracing::debug!(
            submission_id = created.id,
            key = %created.key(),
            subject = %created.subject_name,
            "Submission recorded"
        );
        Ok(created)
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Moves a submission out of `Pending`.
    ///
    /// Repeating the transition it already made returns the stored record
    /// unchanged. Any other change out of a terminal state, or back to
    /// `Pending`, is an [`DomainError::InvalidTransition`].
    pub async fn set_status(
        db: &DatabaseConnection,
        id: i64,
        new_status: SubmissionStatus,
    ) -> DomainResult<Model> {
        if !new_status.is_terminal() {
            return Err(DomainError::InvalidTransition(format!(
                "submission {id} cannot be moved back to {new_status}"
            )));
        }

        let now = Utc::now();
        let mut update = Entity::update_many()
            .col_expr(Column::Status, Expr::value(new_status))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(SubmissionStatus::Pending));

        if new_status == SubmissionStatus::Approved {
            update = update.col_expr(Column::ApprovedAt, Expr::value(Some(now)));
        }

        let outcome = update.exec(db).await?;

        let current = Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| DomainError::submission_not_found(id))?;

        if outcome.rows_affected == 1 {
            tracing::info!(submission_id = id, status = %new_status, "Submission status changed");
            return Ok(current);
        }

        if current.status == new_status {
            tracing::debug!(submission_id = id, status = %new_status, "Repeated transition ignored");
            Ok(current)
        } else {
            Err(DomainError::InvalidTransition(format!(
                "submission {id} is already {}",
                current.status
            )))
        }
    }

    /// Submissions for one student key in insertion order, optionally filtered by status.
    pub async fn list_by_key<C: ConnectionTrait>(
        db: &C,
        key: &StudentKey,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find()
            .filter(Column::RegisterNumber.eq(key.register_number.as_str()))
            .filter(Column::Semester.eq(key.semester.as_str()))
            .filter(Column::Branch.eq(key.branch.as_str()));

        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status));
        }

        query.order_by_asc(Column::Id).all(db).await
    }

    /// Everything a lecturer has reported, oldest first.
    pub async fn list_by_reporter(
        db: &DatabaseConnection,
        lecturer_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::LecturerId.eq(lecturer_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn list_by_status(
        db: &DatabaseConnection,
        status: SubmissionStatus,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Status.eq(status))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn count_by_status(
        db: &DatabaseConnection,
        status: SubmissionStatus,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::Status.eq(status))
            .count(db)
            .await
    }

    /// Number of submissions per reporting lecturer, including unattributed ones.
    pub async fn reporter_stats(db: &DatabaseConnection) -> Result<Vec<ReporterCount>, DbErr> {
        Entity::find()
            .select_only()
            .column(Column::LecturerId)
            .column_as(Expr::col(Column::Id).count(), "submissions")
            .group_by(Column::LecturerId)
            .order_by_asc(Column::LecturerId)
            .into_model::<ReporterCount>()
            .all(db)
            .await
    }
}
