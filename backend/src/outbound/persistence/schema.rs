//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the DDL issued by
//! `DieselEvaluationRepository::initialize`. Column names follow the files
//! written by earlier deployments; the Rust-side names are mapped with
//! `sql_name`.

diesel::table! {
    /// Weekly evaluations, one row per (week, student, evaluation type).
    evaluations (id) {
        /// Surrogate key assigned by SQLite.
        id -> BigInt,
        /// Opaque school-week token.
        #[sql_name = "semaine"]
        week -> Text,
        /// Student reference managed outside this store.
        #[sql_name = "eleveId"]
        student_id -> BigInt,
        /// Display name captured on first write.
        #[sql_name = "eleveNom"]
        student_name -> Text,
        /// Evaluation category.
        #[sql_name = "type"]
        evaluation_type -> Text,
        /// Free-form engagement note.
        engagement -> Nullable<Text>,
        /// Behaviour score.
        #[sql_name = "comportement"]
        behavior -> Nullable<BigInt>,
        /// Absence flag stored as 0/1.
        absent -> Bool,
        /// Opaque evaluation date.
        date -> Text,
    }
}
