//! Driving port for evaluation writes.
//!
//! Inbound adapters use this port to record and remove evaluations without
//! depending on repository details.

use async_trait::async_trait;

use crate::domain::{Error, EvaluationDraft, EvaluationId, UpsertOutcome};

/// Request to record an evaluation by business key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertEvaluationRequest {
    pub draft: EvaluationDraft,
}

/// Request to remove one evaluation by surrogate id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteEvaluationRequest {
    pub id: EvaluationId,
}

/// Number of rows removed by a delete; zero when the id was unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteEvaluationResponse {
    pub deleted: usize,
}

/// Driving port for evaluation write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationsCommand: Send + Sync {
    /// Create the evaluation for the draft's key, or overwrite the mutable
    /// fields of the one already stored under it.
    async fn upsert(&self, request: UpsertEvaluationRequest) -> Result<UpsertOutcome, Error>;

    /// Remove an evaluation. Unknown ids are not an error.
    async fn delete(
        &self,
        request: DeleteEvaluationRequest,
    ) -> Result<DeleteEvaluationResponse, Error>;
}
