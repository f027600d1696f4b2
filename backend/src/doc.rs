//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the evaluation endpoints, the health probes and the
//! schema wrappers for domain errors. The document backs Swagger UI in debug
//! builds and is exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::evaluations::{
    DeleteEvaluationResponseBody, EvaluationBody, UpsertEvaluationRequestBody,
    UpsertEvaluationResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Evaluations API",
        description = "Weekly student evaluations: list, record and delete."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::evaluations::list_evaluations,
        crate::inbound::http::evaluations::list_student_evaluations,
        crate::inbound::http::evaluations::upsert_evaluation,
        crate::inbound::http::evaluations::delete_evaluation,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        EvaluationBody,
        UpsertEvaluationRequestBody,
        UpsertEvaluationResponseBody,
        DeleteEvaluationResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "evaluations", description = "Weekly evaluation records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
