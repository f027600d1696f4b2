//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;

use crate::domain::{Evaluation, EvaluationDraft, EvaluationFields};

use super::schema::evaluations;

/// Row struct for reading from the evaluations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = evaluations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct EvaluationRow {
    pub id: i64,
    pub week: String,
    pub student_id: i64,
    pub student_name: String,
    pub evaluation_type: String,
    pub engagement: Option<String>,
    pub behavior: Option<i64>,
    pub absent: bool,
    pub date: String,
}

impl From<EvaluationRow> for Evaluation {
    fn from(row: EvaluationRow) -> Self {
        let EvaluationRow {
            id,
            week,
            student_id,
            student_name,
            evaluation_type,
            engagement,
            behavior,
            absent,
            date,
        } = row;
        Self {
            id,
            week,
            student_id,
            student_name,
            evaluation_type,
            engagement,
            behavior,
            absent,
            date,
        }
    }
}

/// Insertable struct for creating evaluation rows.
///
/// `None` binds NULL rather than falling back to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = evaluations)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewEvaluationRow<'a> {
    pub week: &'a str,
    pub student_id: i64,
    pub student_name: &'a str,
    pub evaluation_type: &'a str,
    pub engagement: Option<&'a str>,
    pub behavior: Option<i64>,
    pub absent: bool,
    pub date: &'a str,
}

impl<'a> From<&'a EvaluationDraft> for NewEvaluationRow<'a> {
    fn from(draft: &'a EvaluationDraft) -> Self {
        Self {
            week: draft.key.week.as_str(),
            student_id: draft.key.student_id,
            student_name: draft.student_name.as_str(),
            evaluation_type: draft.key.evaluation_type.as_str(),
            engagement: draft.fields.engagement.as_deref(),
            behavior: draft.fields.behavior,
            absent: draft.fields.absent,
            date: draft.fields.date.as_str(),
        }
    }
}

/// Changeset overwriting the mutable fields of an evaluation row.
///
/// `None` writes NULL so an omitted field clears the stored value.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = evaluations)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct EvaluationUpdate<'a> {
    pub engagement: Option<&'a str>,
    pub behavior: Option<i64>,
    pub absent: bool,
    pub date: &'a str,
}

impl<'a> From<&'a EvaluationFields> for EvaluationUpdate<'a> {
    fn from(fields: &'a EvaluationFields) -> Self {
        Self {
            engagement: fields.engagement.as_deref(),
            behavior: fields.behavior,
            absent: fields.absent,
            date: fields.date.as_str(),
        }
    }
}
