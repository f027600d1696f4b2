//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EvaluationsCommand, EvaluationsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub evaluations: Arc<dyn EvaluationsCommand>,
    pub evaluations_query: Arc<dyn EvaluationsQuery>,
}

impl HttpState {
    /// Construct state from the evaluation ports.
    ///
    /// A single service usually backs both ports:
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use evaluations::domain::EvaluationService;
    /// use evaluations::inbound::http::state::HttpState;
    /// use evaluations::outbound::persistence::{DbPool, DieselEvaluationRepository, PoolConfig};
    ///
    /// # async fn build() -> Result<HttpState, Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("evaluations.db")).await?;
    /// let service = Arc::new(EvaluationService::new(Arc::new(
    ///     DieselEvaluationRepository::new(pool),
    /// )));
    /// let state = HttpState::new(service.clone(), service);
    /// # Ok(state)
    /// # }
    /// ```
    pub fn new(
        evaluations: Arc<dyn EvaluationsCommand>,
        evaluations_query: Arc<dyn EvaluationsQuery>,
    ) -> Self {
        Self {
            evaluations,
            evaluations_query,
        }
    }
}
