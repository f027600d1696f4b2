//! Domain primitives, services and ports.
//!
//! Purpose: define the evaluation record, the upsert outcome and the
//! transport-agnostic error type, plus the service that applies the
//! evaluation rules over the repository port.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Evaluation, EvaluationKey, EvaluationFields, EvaluationDraft: records.
//! - UpsertOutcome: created/updated result of a keyed write.
//! - EvaluationService: implements the evaluation driving ports.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod evaluation;
mod evaluation_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::evaluation::{
    Evaluation, EvaluationDraft, EvaluationFields, EvaluationId, EvaluationKey, StudentId,
    UpsertOutcome,
};
pub use self::evaluation_service::EvaluationService;
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
