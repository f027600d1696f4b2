//! Tests for the evaluation service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{EvaluationRepositoryError, MockEvaluationRepository};
use crate::domain::{ErrorCode, EvaluationDraft, EvaluationFields, EvaluationKey};

#[fixture]
fn quiz_draft() -> EvaluationDraft {
    EvaluationDraft {
        key: EvaluationKey::new("2024-W10", 5, "quiz"),
        student_name: "A".to_owned(),
        fields: EvaluationFields {
            engagement: Some("good".to_owned()),
            behavior: Some(4),
            absent: false,
            date: "2024-03-04".to_owned(),
        },
    }
}

fn stored(id: i64, week: &str, student_id: i64) -> Evaluation {
    Evaluation {
        id,
        week: week.to_owned(),
        student_id,
        student_name: format!("student {student_id}"),
        evaluation_type: "quiz".to_owned(),
        engagement: None,
        behavior: None,
        absent: false,
        date: "2024-03-04".to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn upsert_passes_draft_through_and_reports_creation(quiz_draft: EvaluationDraft) {
    let expected = quiz_draft.clone();
    let mut repo = MockEvaluationRepository::new();
    repo.expect_upsert()
        .withf(move |draft| *draft == expected)
        .times(1)
        .return_once(|_| Ok(UpsertOutcome::Created { id: 1 }));

    let service = EvaluationService::new(Arc::new(repo));
    let outcome = service
        .upsert(UpsertEvaluationRequest { draft: quiz_draft })
        .await
        .expect("upsert succeeds");

    assert_eq!(outcome, UpsertOutcome::Created { id: 1 });
}

#[rstest]
#[tokio::test]
async fn upsert_reports_update_with_existing_id(quiz_draft: EvaluationDraft) {
    let mut repo = MockEvaluationRepository::new();
    repo.expect_upsert()
        .times(1)
        .return_once(|_| Ok(UpsertOutcome::Updated { id: 12 }));

    let service = EvaluationService::new(Arc::new(repo));
    let outcome = service
        .upsert(UpsertEvaluationRequest { draft: quiz_draft })
        .await
        .expect("upsert succeeds");

    assert_eq!(outcome.id(), 12);
    assert!(!outcome.is_created());
}

#[rstest]
#[tokio::test]
async fn upsert_never_uses_check_then_insert(quiz_draft: EvaluationDraft) {
    let mut repo = MockEvaluationRepository::new();
    repo.expect_find_by_key().times(0);
    repo.expect_insert().times(0);
    repo.expect_update().times(0);
    repo.expect_upsert()
        .times(1)
        .return_once(|_| Ok(UpsertOutcome::Created { id: 2 }));

    let service = EvaluationService::new(Arc::new(repo));
    service
        .upsert(UpsertEvaluationRequest { draft: quiz_draft })
        .await
        .expect("upsert succeeds");
}

#[rstest]
#[tokio::test]
async fn store_errors_surface_raw_message_as_internal(quiz_draft: EvaluationDraft) {
    let mut repo = MockEvaluationRepository::new();
    repo.expect_upsert().times(1).return_once(|_| {
        Err(EvaluationRepositoryError::query(
            "attempt to write a readonly database",
        ))
    });

    let service = EvaluationService::new(Arc::new(repo));
    let error = service
        .upsert(UpsertEvaluationRequest { draft: quiz_draft })
        .await
        .expect_err("store failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "attempt to write a readonly database");
}

#[rstest]
#[case(1)]
#[case(0)]
#[tokio::test]
async fn delete_reports_removed_count(#[case] removed: usize) {
    let mut repo = MockEvaluationRepository::new();
    repo.expect_delete_by_id()
        .with(eq(42))
        .times(1)
        .return_once(move |_| Ok(removed));

    let service = EvaluationService::new(Arc::new(repo));
    let response = service
        .delete(DeleteEvaluationRequest { id: 42 })
        .await
        .expect("delete succeeds");

    assert_eq!(response.deleted, removed);
}

#[rstest]
#[tokio::test]
async fn delete_maps_connection_error_to_internal() {
    let mut repo = MockEvaluationRepository::new();
    repo.expect_delete_by_id()
        .times(1)
        .return_once(|_| Err(EvaluationRepositoryError::connection("database is locked")));

    let service = EvaluationService::new(Arc::new(repo));
    let error = service
        .delete(DeleteEvaluationRequest { id: 1 })
        .await
        .expect_err("connection failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "database is locked");
}

#[rstest]
#[tokio::test]
async fn list_all_returns_repository_rows_in_order() {
    let rows = vec![stored(2, "2024-W11", 5), stored(1, "2024-W10", 6)];
    let expected = rows.clone();
    let mut repo = MockEvaluationRepository::new();
    repo.expect_list_all().times(1).return_once(move || Ok(rows));

    let service = EvaluationService::new(Arc::new(repo));
    let listed = service.list_all().await.expect("list succeeds");

    assert_eq!(listed, expected);
}

#[rstest]
#[tokio::test]
async fn list_for_student_queries_requested_student() {
    let rows = vec![stored(3, "2024-W12", 7)];
    let mut repo = MockEvaluationRepository::new();
    repo.expect_list_by_student()
        .with(eq(7))
        .times(1)
        .return_once(move |_| Ok(rows));

    let service = EvaluationService::new(Arc::new(repo));
    let listed = service
        .list_for_student(ListStudentEvaluationsRequest { student_id: 7 })
        .await
        .expect("list succeeds");

    assert_eq!(listed.len(), 1);
    assert!(listed.iter().all(|row| row.student_id == 7));
}
