//! Evaluation domain service.
//!
//! Implements the evaluation driving ports on top of the repository port.
//! The upsert rule lives in the store as a single atomic operation; this
//! service only translates outcomes and errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    DeleteEvaluationRequest, DeleteEvaluationResponse, EvaluationRepository,
    EvaluationRepositoryError, EvaluationsCommand, EvaluationsQuery,
    ListStudentEvaluationsRequest, UpsertEvaluationRequest,
};
use crate::domain::{Error, Evaluation, UpsertOutcome};

/// Store failures reach callers as internal errors carrying the store's own
/// message.
fn map_repository_error(error: EvaluationRepositoryError) -> Error {
    warn!(%error, "evaluation store operation failed");
    Error::internal(error.store_message())
}

/// Evaluation service implementing both command and query driving ports.
#[derive(Clone)]
pub struct EvaluationService<R> {
    evaluation_repo: Arc<R>,
}

impl<R> EvaluationService<R> {
    /// Create a new service backed by the evaluation repository.
    pub fn new(evaluation_repo: Arc<R>) -> Self {
        Self { evaluation_repo }
    }
}

#[async_trait]
impl<R> EvaluationsCommand for EvaluationService<R>
where
    R: EvaluationRepository,
{
    async fn upsert(&self, request: UpsertEvaluationRequest) -> Result<UpsertOutcome, Error> {
        let UpsertEvaluationRequest { draft } = request;
        let outcome = self
            .evaluation_repo
            .upsert(&draft)
            .await
            .map_err(map_repository_error)?;

        info!(
            key = %draft.key,
            id = outcome.id(),
            created = outcome.is_created(),
            "evaluation recorded"
        );
        Ok(outcome)
    }

    async fn delete(
        &self,
        request: DeleteEvaluationRequest,
    ) -> Result<DeleteEvaluationResponse, Error> {
        let deleted = self
            .evaluation_repo
            .delete_by_id(request.id)
            .await
            .map_err(map_repository_error)?;

        if deleted == 0 {
            debug!(id = request.id, "delete matched no evaluation");
        } else {
            info!(id = request.id, "evaluation deleted");
        }
        Ok(DeleteEvaluationResponse { deleted })
    }
}

#[async_trait]
impl<R> EvaluationsQuery for EvaluationService<R>
where
    R: EvaluationRepository,
{
    async fn list_all(&self) -> Result<Vec<Evaluation>, Error> {
        self.evaluation_repo
            .list_all()
            .await
            .map_err(map_repository_error)
    }

    async fn list_for_student(
        &self,
        request: ListStudentEvaluationsRequest,
    ) -> Result<Vec<Evaluation>, Error> {
        self.evaluation_repo
            .list_by_student(request.student_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "evaluation_service_tests.rs"]
mod tests;
