//! Attendance eligibility classification.
//!
//! The same rule is applied when a submission is stored, when a result is
//! aggregated and when a result is imported, so every record that carries an
//! eligibility agrees on it for the same attendance figure.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Minimum attendance percentage required to sit the examination.
pub const ELIGIBILITY_THRESHOLD: i32 = 75;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Eligibility {
    #[sea_orm(string_value = "eligible")]
    Eligible,
    #[sea_orm(string_value = "not_eligible")]
    NotEligible,
}

/// Maps an attendance percentage to its eligibility.
pub fn classify(attendance_percent: i32) -> Eligibility {
    if attendance_percent >= ELIGIBILITY_THRESHOLD {
        Eligibility::Eligible
    } else {
        Eligibility::NotEligible
    }
}

/// Eligibility of a set of attendance figures: the lowest one decides.
///
/// Returns `None` for an empty set.
pub fn classify_lowest<I>(attendance: I) -> Option<Eligibility>
where
    I: IntoIterator<Item = i32>,
{
    attendance.into_iter().min().map(classify)
}
