//! Finalized semester results, one row per student key.
//!
//! Rows are only written by the aggregation engine (and bulk import, which
//! shares its write path). Every write replaces the whole record.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromJsonQueryResult,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::eligibility::Eligibility;
use crate::models::student_key::StudentKey;

/// Minimum percentage for a `Pass`.
pub const PASS_PERCENTAGE: f64 = 40.0;

/// Maximum marks a single subject contributes.
pub const MARKS_PER_SUBJECT: i32 = 100;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PassStatus {
    #[sea_orm(string_value = "Pass")]
    Pass,
    #[sea_orm(string_value = "Fail")]
    Fail,
}

impl PassStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= PASS_PERCENTAGE {
            PassStatus::Pass
        } else {
            PassStatus::Fail
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectMark {
    pub subject_name: String,
    pub marks: i32,
}

/// Ordered subject breakdown stored as a JSON column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct SubjectList(pub Vec<SubjectMark>);

impl SubjectList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectMark> {
        self.0.iter()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub register_number: String,
    pub semester: String,
    pub branch: String,
    pub student_name: String,
    pub student_email: String,
    #[sea_orm(column_type = "Json")]
    pub subjects: SubjectList,
    pub total_marks: i32,
    #[sea_orm(column_type = "Double")]
    pub percentage: f64,
    pub pass_status: PassStatus,
    pub attendance_eligibility: Eligibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Everything a result row holds apart from its key and bookkeeping columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultFields {
    pub student_name: String,
    pub student_email: String,
    pub subjects: SubjectList,
    pub total_marks: i32,
    pub percentage: f64,
    pub pass_status: PassStatus,
    pub attendance_eligibility: Eligibility,
}

impl ResultFields {
    /// Derives totals, percentage and pass status from the contributing subjects.
    ///
    /// The denominator is `expected_subjects` × [`MARKS_PER_SUBJECT`]. A list
    /// longer than `expected_subjects` is scored over its own length so the
    /// percentage never exceeds 100.
    pub fn compute(
        student_name: impl Into<String>,
        student_email: impl Into<String>,
        subjects: Vec<SubjectMark>,
        attendance_eligibility: Eligibility,
        expected_subjects: usize,
    ) -> Self {
        let total_marks: i32 = subjects.iter().map(|s| s.marks).sum();
        let max_marks = expected_subjects.max(subjects.len()) as i32 * MARKS_PER_SUBJECT;
        let percentage = if max_marks == 0 {
            0.0
        } else {
            f64::from(total_marks) * 100.0 / f64::from(max_marks)
        };

        Self {
            student_name: student_name.into(),
            student_email: student_email.into(),
            subjects: SubjectList(subjects),
            total_marks,
            percentage,
            pass_status: PassStatus::from_percentage(percentage),
            attendance_eligibility,
        }
    }
}

impl Model {
    pub fn key(&self) -> StudentKey {
        StudentKey::new(&self.register_number, &self.semester, &self.branch)
    }

    pub async fn find_by_key<C: ConnectionTrait>(
        db: &C,
        key: &StudentKey,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::RegisterNumber.eq(key.register_number.as_str()))
            .filter(Column::Semester.eq(key.semester.as_str()))
            .filter(Column::Branch.eq(key.branch.as_str()))
            .one(db)
            .await
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Creates the result for `key`, or replaces every field of the existing one.
    ///
    /// Callers serialize writers per key; run inside a transaction to keep the
    /// read and the write together.
    pub async fn upsert<C: ConnectionTrait>(
        db: &C,
        key: &StudentKey,
        fields: ResultFields,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let existing = Self::find_by_key(db, key).await?;
        let is_new = existing.is_none();

        let mut active = match existing {
            Some(existing) => existing.into_active_model(),
            None => ActiveModel {
                register_number: Set(key.register_number.clone()),
                semester: Set(key.semester.clone()),
                branch: Set(key.branch.clone()),
                created_at: Set(now),
                ..Default::default()
            },
        };

        active.student_name = Set(fields.student_name);
        active.student_email = Set(fields.student_email);
        active.subjects = Set(fields.subjects);
        active.total_marks = Set(fields.total_marks);
        active.percentage = Set(fields.percentage);
        active.pass_status = Set(fields.pass_status);
        active.attendance_eligibility = Set(fields.attendance_eligibility);
        active.updated_at = Set(now);

        if is_new {
            active.insert(db).await
        } else {
            active.update(db).await
        }
    }

    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::RegisterNumber)
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Branch)
            .all(db)
            .await
    }

    /// Results for one register number, optionally narrowed to a semester.
    pub async fn find_by_register_number(
        db: &DatabaseConnection,
        register_number: &str,
        semester: Option<&str>,
    ) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find().filter(Column::RegisterNumber.eq(register_number.trim()));
        if let Some(semester) = semester {
            query = query.filter(Column::Semester.eq(semester.trim()));
        }

        query
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<bool, DbErr> {
        let outcome = Entity::delete_by_id(id).exec(db).await?;
        Ok(outcome.rows_affected > 0)
    }
}
