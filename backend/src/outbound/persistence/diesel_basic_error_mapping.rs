//! Shared Diesel error mapping for repositories with basic query semantics.
//!
//! SQLite's own message is kept verbatim so callers can report exactly what
//! the store rejected.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel error variants into query/connection/constraint constructors.
///
/// Uniqueness violations map to the constraint constructor; a closed
/// connection maps to the connection constructor; everything else is a query
/// failure.
pub fn map_basic_diesel_error<E, Q, C, V>(
    error: DieselError,
    query: Q,
    connection: C,
    constraint: V,
) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
    V: FnOnce(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            constraint(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        other => query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error classification.

    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
        Constraint(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(
            error,
            Mapped::Query,
            Mapped::Connection,
            Mapped::Constraint,
        )
    }

    #[rstest]
    fn unique_violation_maps_to_constraint_with_raw_message() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("UNIQUE constraint failed: evaluations.semaine")),
        );

        assert_eq!(
            map(error),
            Mapped::Constraint("UNIQUE constraint failed: evaluations.semaine".to_owned())
        );
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("connection closed")),
        );

        assert_eq!(map(error), Mapped::Connection("connection closed".to_owned()));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        assert_eq!(
            map(DieselError::NotFound),
            Mapped::Query("Record not found".to_owned())
        );
    }

    #[rstest]
    fn pool_errors_map_to_connection_constructor() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }
}
