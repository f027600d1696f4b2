//! Port for evaluation persistence.
//!
//! The store owns all durable state. It enforces uniqueness of
//! (week, student, evaluation type) and exposes both the raw insert/update
//! primitives and an atomic [`EvaluationRepository::upsert`] that resolves
//! the key and writes in one step.

use async_trait::async_trait;

use crate::domain::{
    Evaluation, EvaluationDraft, EvaluationFields, EvaluationId, EvaluationKey, StudentId,
    UpsertOutcome,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by evaluation repository adapters.
    pub enum EvaluationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "evaluation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "evaluation repository query failed: {message}",
        /// A row for the same (week, student, evaluation type) already exists.
        ConstraintViolation { message: String } =>
            "evaluation repository constraint violated: {message}",
    }
}

impl EvaluationRepositoryError {
    /// Message reported by the underlying store, without the adapter prefix.
    pub fn store_message(&self) -> &str {
        match self {
            Self::Connection { message }
            | Self::Query { message }
            | Self::ConstraintViolation { message } => message.as_str(),
        }
    }
}

/// Port for reading and writing evaluation rows.
///
/// Listings are ordered by week descending using plain string comparison;
/// rows sharing a week keep insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    /// Ensure the backing schema exists. Safe to call on every start; never
    /// drops or rewrites existing rows.
    async fn initialize(&self) -> Result<(), EvaluationRepositoryError>;

    /// Insert a new row and return its surrogate id.
    ///
    /// Fails with [`EvaluationRepositoryError::ConstraintViolation`] when the
    /// draft's key already exists.
    async fn insert(&self, draft: &EvaluationDraft)
    -> Result<EvaluationId, EvaluationRepositoryError>;

    /// Overwrite the mutable fields of the row matching `key`.
    ///
    /// Returns the number of rows affected; zero means no row matched and is
    /// not an error.
    async fn update(
        &self,
        key: &EvaluationKey,
        fields: &EvaluationFields,
    ) -> Result<usize, EvaluationRepositoryError>;

    /// Find the row matching `key`.
    async fn find_by_key(
        &self,
        key: &EvaluationKey,
    ) -> Result<Option<Evaluation>, EvaluationRepositoryError>;

    /// Insert the draft, or overwrite the mutable fields of the row already
    /// holding its key, as one atomic operation.
    async fn upsert(&self, draft: &EvaluationDraft)
    -> Result<UpsertOutcome, EvaluationRepositoryError>;

    /// Every row in the store.
    async fn list_all(&self) -> Result<Vec<Evaluation>, EvaluationRepositoryError>;

    /// Every row for one student.
    async fn list_by_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Evaluation>, EvaluationRepositoryError>;

    /// Remove the row with surrogate id `id`, returning the number removed.
    async fn delete_by_id(&self, id: EvaluationId) -> Result<usize, EvaluationRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn constraint_violation_formats_message() {
        let err = EvaluationRepositoryError::constraint_violation(
            "UNIQUE constraint failed: evaluations.semaine",
        );
        assert_eq!(
            err.to_string(),
            "evaluation repository constraint violated: UNIQUE constraint failed: evaluations.semaine"
        );
    }

    #[rstest]
    #[case(EvaluationRepositoryError::connection("unable to open database file"))]
    #[case(EvaluationRepositoryError::query("unable to open database file"))]
    #[case(EvaluationRepositoryError::constraint_violation("unable to open database file"))]
    fn store_message_strips_adapter_prefix(#[case] err: EvaluationRepositoryError) {
        assert_eq!(err.store_message(), "unable to open database file");
    }
}
