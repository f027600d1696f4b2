//! Evaluation HTTP handlers.
//!
//! ```text
//! GET    /api/evaluations
//! GET    /api/evaluations/eleve/{student_id}
//! POST   /api/evaluations
//! DELETE /api/evaluations/{id}
//! ```
//!
//! Each route also matches with a trailing slash.
//!
//! Request bodies accept both the English field names and the legacy French
//! column names (`semaine`, `eleveId`, `eleveNom`, `type`, `comportement`).
//! Responses always use the English camelCase names.

use actix_web::{delete, get, post, routes, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    DeleteEvaluationRequest, DeleteEvaluationResponse, ListStudentEvaluationsRequest,
    UpsertEvaluationRequest,
};
use crate::domain::{
    Evaluation, EvaluationDraft, EvaluationFields, EvaluationId, EvaluationKey, StudentId,
    UpsertOutcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Evaluation as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationBody {
    pub id: EvaluationId,
    #[schema(example = "2024-W10")]
    pub week: String,
    pub student_id: StudentId,
    pub student_name: String,
    #[schema(example = "quiz")]
    pub evaluation_type: String,
    pub engagement: Option<String>,
    pub behavior: Option<i64>,
    pub absent: bool,
    #[schema(example = "2024-03-04")]
    pub date: String,
}

impl From<Evaluation> for EvaluationBody {
    fn from(value: Evaluation) -> Self {
        Self {
            id: value.id,
            week: value.week,
            student_id: value.student_id,
            student_name: value.student_name,
            evaluation_type: value.evaluation_type,
            engagement: value.engagement,
            behavior: value.behavior,
            absent: value.absent,
            date: value.date,
        }
    }
}

/// Request payload for recording an evaluation.
///
/// `engagement` and `behavior` may be omitted or null; `absent` defaults to
/// false. Every write replaces all three along with `date`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertEvaluationRequestBody {
    #[serde(alias = "semaine")]
    #[schema(example = "2024-W10")]
    pub week: String,
    #[serde(alias = "eleveId")]
    pub student_id: StudentId,
    #[serde(alias = "eleveNom")]
    pub student_name: String,
    #[serde(alias = "type")]
    #[schema(example = "quiz")]
    pub evaluation_type: String,
    #[serde(default)]
    pub engagement: Option<String>,
    #[serde(default, alias = "comportement")]
    pub behavior: Option<i64>,
    #[serde(default)]
    pub absent: Option<bool>,
    #[schema(example = "2024-03-04")]
    pub date: String,
}

impl From<UpsertEvaluationRequestBody> for EvaluationDraft {
    fn from(value: UpsertEvaluationRequestBody) -> Self {
        Self {
            key: EvaluationKey::new(value.week, value.student_id, value.evaluation_type),
            student_name: value.student_name,
            fields: EvaluationFields {
                engagement: value.engagement,
                behavior: value.behavior,
                absent: value.absent.unwrap_or(false),
                date: value.date,
            },
        }
    }
}

/// Response payload for an upsert: `created` or `updated` is set, never both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertEvaluationResponseBody {
    pub id: EvaluationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<bool>,
}

impl From<UpsertOutcome> for UpsertEvaluationResponseBody {
    fn from(value: UpsertOutcome) -> Self {
        match value {
            UpsertOutcome::Created { id } => Self {
                id,
                created: Some(true),
                updated: None,
            },
            UpsertOutcome::Updated { id } => Self {
                id,
                created: None,
                updated: Some(true),
            },
        }
    }
}

/// Response payload for a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeleteEvaluationResponseBody {
    /// Rows removed: 1, or 0 when the id was unknown.
    pub deleted: usize,
}

impl From<DeleteEvaluationResponse> for DeleteEvaluationResponseBody {
    fn from(value: DeleteEvaluationResponse) -> Self {
        Self {
            deleted: value.deleted,
        }
    }
}

fn to_bodies(evaluations: Vec<Evaluation>) -> Vec<EvaluationBody> {
    evaluations.into_iter().map(EvaluationBody::from).collect()
}

/// List every evaluation, most recent week first.
#[utoipa::path(
    get,
    path = "/api/evaluations",
    responses(
        (status = 200, description = "All evaluations", body = [EvaluationBody]),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["evaluations"],
    operation_id = "listEvaluations"
)]
#[routes]
#[get("")]
#[get("/")]
pub async fn list_evaluations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EvaluationBody>>> {
    let evaluations = state.evaluations_query.list_all().await?;
    Ok(web::Json(to_bodies(evaluations)))
}

/// List the evaluations of one student, most recent week first.
#[utoipa::path(
    get,
    path = "/api/evaluations/eleve/{student_id}",
    params(("student_id" = i64, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Evaluations of the student", body = [EvaluationBody]),
        (status = 400, description = "Invalid student id", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["evaluations"],
    operation_id = "listStudentEvaluations"
)]
#[routes]
#[get("/eleve/{student_id}")]
#[get("/eleve/{student_id}/")]
pub async fn list_student_evaluations(
    state: web::Data<HttpState>,
    path: web::Path<StudentId>,
) -> ApiResult<web::Json<Vec<EvaluationBody>>> {
    let evaluations = state
        .evaluations_query
        .list_for_student(ListStudentEvaluationsRequest {
            student_id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(to_bodies(evaluations)))
}

/// Record an evaluation, creating it or overwriting the existing row for the
/// same week, student and evaluation type.
#[utoipa::path(
    post,
    path = "/api/evaluations",
    request_body = UpsertEvaluationRequestBody,
    responses(
        (status = 200, description = "Evaluation created or updated", body = UpsertEvaluationResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["evaluations"],
    operation_id = "upsertEvaluation"
)]
#[routes]
#[post("")]
#[post("/")]
pub async fn upsert_evaluation(
    state: web::Data<HttpState>,
    payload: web::Json<UpsertEvaluationRequestBody>,
) -> ApiResult<web::Json<UpsertEvaluationResponseBody>> {
    let outcome = state
        .evaluations
        .upsert(UpsertEvaluationRequest {
            draft: EvaluationDraft::from(payload.into_inner()),
        })
        .await?;
    Ok(web::Json(UpsertEvaluationResponseBody::from(outcome)))
}

/// Delete an evaluation by surrogate id.
#[utoipa::path(
    delete,
    path = "/api/evaluations/{id}",
    params(("id" = i64, Path, description = "Evaluation identifier")),
    responses(
        (status = 200, description = "Rows removed", body = DeleteEvaluationResponseBody),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["evaluations"],
    operation_id = "deleteEvaluation"
)]
#[routes]
#[delete("/{id}")]
#[delete("/{id}/")]
pub async fn delete_evaluation(
    state: web::Data<HttpState>,
    path: web::Path<EvaluationId>,
) -> ApiResult<web::Json<DeleteEvaluationResponseBody>> {
    let response = state
        .evaluations
        .delete(DeleteEvaluationRequest {
            id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(DeleteEvaluationResponseBody::from(response)))
}

#[cfg(test)]
#[path = "evaluations_tests.rs"]
mod tests;
