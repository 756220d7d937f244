//! Error taxonomy shared by the submission store, the result store and the engine.

use sea_orm::DbErr;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Malformed or out-of-range input rejected before anything is persisted.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    /// Disallowed status change, or aggregation of a submission that is not approved.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DbErr),
}

impl DomainError {
    pub fn submission_not_found(id: i64) -> Self {
        DomainError::NotFound(format!("Submission {id}"))
    }

    pub fn result_not_found(id: i64) -> Self {
        DomainError::NotFound(format!("Result {id}"))
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::Validation(common::format_validation_errors(&errors))
    }
}
