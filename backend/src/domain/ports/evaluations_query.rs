//! Driving port for evaluation reads.

use async_trait::async_trait;

use crate::domain::{Error, Evaluation, StudentId};

/// Request to list the evaluations of one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStudentEvaluationsRequest {
    pub student_id: StudentId,
}

/// Driving port for evaluation read operations.
///
/// Both listings are ordered by week descending (string comparison).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationsQuery: Send + Sync {
    /// Every stored evaluation.
    async fn list_all(&self) -> Result<Vec<Evaluation>, Error>;

    /// Evaluations recorded for a single student.
    async fn list_for_student(
        &self,
        request: ListStudentEvaluationsRequest,
    ) -> Result<Vec<Evaluation>, Error>;
}
