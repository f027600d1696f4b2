//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod evaluation_repository;
mod evaluations_command;
mod evaluations_query;

#[cfg(test)]
pub use evaluation_repository::MockEvaluationRepository;
pub use evaluation_repository::{EvaluationRepository, EvaluationRepositoryError};
#[cfg(test)]
pub use evaluations_command::MockEvaluationsCommand;
pub use evaluations_command::{
    DeleteEvaluationRequest, DeleteEvaluationResponse, EvaluationsCommand,
    UpsertEvaluationRequest,
};
#[cfg(test)]
pub use evaluations_query::MockEvaluationsQuery;
pub use evaluations_query::{EvaluationsQuery, ListStudentEvaluationsRequest};
