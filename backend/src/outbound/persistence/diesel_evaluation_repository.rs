//! SQLite-backed `EvaluationRepository` implementation using Diesel ORM.
//!
//! The table keeps the column names used by existing `evaluations.db` files,
//! so databases written by earlier deployments open without migration.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{EvaluationRepository, EvaluationRepositoryError};
use crate::domain::{
    Evaluation, EvaluationDraft, EvaluationFields, EvaluationId, EvaluationKey, StudentId,
    UpsertOutcome,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EvaluationRow, EvaluationUpdate, NewEvaluationRow};
use super::pool::{AsyncSqliteConnection, DbPool, PoolError};
use super::schema::evaluations;

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS evaluations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    semaine TEXT NOT NULL,
    eleveId INTEGER NOT NULL,
    eleveNom TEXT NOT NULL,
    type TEXT NOT NULL,
    engagement TEXT,
    comportement INTEGER,
    absent INTEGER NOT NULL DEFAULT 0,
    date TEXT NOT NULL,
    UNIQUE(semaine, eleveId, type)
)"#;

const CREATE_STUDENT_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_evaluations_student ON evaluations (eleveId)";

/// Diesel-backed implementation of the evaluation repository port.
#[derive(Clone)]
pub struct DieselEvaluationRepository {
    pool: DbPool,
}

impl DieselEvaluationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EvaluationRepositoryError {
    map_basic_pool_error(error, EvaluationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EvaluationRepositoryError {
    map_basic_diesel_error(
        error,
        EvaluationRepositoryError::query,
        EvaluationRepositoryError::connection,
        EvaluationRepositoryError::constraint_violation,
    )
}

/// Filter matching the single row holding `key`.
macro_rules! by_key {
    ($key:expr) => {
        evaluations::table.filter(
            evaluations::week
                .eq($key.week.as_str())
                .and(evaluations::student_id.eq($key.student_id))
                .and(evaluations::evaluation_type.eq($key.evaluation_type.as_str())),
        )
    };
}

async fn upsert_in_transaction(
    conn: &mut AsyncSqliteConnection,
    draft: &EvaluationDraft,
) -> Result<UpsertOutcome, diesel::result::Error> {
    let existing: Option<i64> = by_key!(draft.key)
        .select(evaluations::id)
        .first(conn)
        .await
        .optional()?;

    // The stored student name survives a conflicting write.
    let id: i64 = diesel::insert_into(evaluations::table)
        .values(&NewEvaluationRow::from(draft))
        .on_conflict((
            evaluations::week,
            evaluations::student_id,
            evaluations::evaluation_type,
        ))
        .do_update()
        .set((
            evaluations::engagement.eq(excluded(evaluations::engagement)),
            evaluations::behavior.eq(excluded(evaluations::behavior)),
            evaluations::absent.eq(excluded(evaluations::absent)),
            evaluations::date.eq(excluded(evaluations::date)),
        ))
        .returning(evaluations::id)
        .get_result(conn)
        .await?;

    Ok(match existing {
        Some(_) => UpsertOutcome::Updated { id },
        None => UpsertOutcome::Created { id },
    })
}

#[async_trait]
impl EvaluationRepository for DieselEvaluationRepository {
    async fn initialize(&self) -> Result<(), EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::sql_query(CREATE_TABLE_SQL)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        diesel::sql_query(CREATE_STUDENT_INDEX_SQL)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(path = %self.pool.database_path(), "evaluation schema ready");
        Ok(())
    }

    async fn insert(
        &self,
        draft: &EvaluationDraft,
    ) -> Result<EvaluationId, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(evaluations::table)
            .values(&NewEvaluationRow::from(draft))
            .returning(evaluations::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        key: &EvaluationKey,
        fields: &EvaluationFields,
    ) -> Result<usize, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(by_key!(key))
            .set(&EvaluationUpdate::from(fields))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_by_key(
        &self,
        key: &EvaluationKey,
    ) -> Result<Option<Evaluation>, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = by_key!(key)
            .select(EvaluationRow::as_select())
            .first::<EvaluationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Evaluation::from))
    }

    async fn upsert(
        &self,
        draft: &EvaluationDraft,
    ) -> Result<UpsertOutcome, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| async move { upsert_in_transaction(conn, draft).await }.scope_boxed())
            .await
            .map_err(map_diesel_error)
    }

    async fn list_all(&self) -> Result<Vec<Evaluation>, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EvaluationRow> = evaluations::table
            .order((evaluations::week.desc(), evaluations::id.asc()))
            .select(EvaluationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Evaluation::from).collect())
    }

    async fn list_by_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Evaluation>, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EvaluationRow> = evaluations::table
            .filter(evaluations::student_id.eq(student_id))
            .order((evaluations::week.desc(), evaluations::id.asc()))
            .select(EvaluationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Evaluation::from).collect())
    }

    async fn delete_by_id(&self, id: EvaluationId) -> Result<usize, EvaluationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(evaluations::table.filter(evaluations::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
