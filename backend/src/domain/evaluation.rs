//! Weekly evaluation records.
//!
//! An [`Evaluation`] is identified twice: by the surrogate `id` the store
//! assigns, and by the business key ([`EvaluationKey`]) of week, student and
//! evaluation type. The business key is unique across the store; writes that
//! repeat a key overwrite the row's [`EvaluationFields`] in place.
//!
//! Week tokens, evaluation types and dates are opaque strings. They are never
//! parsed, so ordering by week is plain lexicographic ordering.

/// Store-assigned surrogate identifier of an evaluation row.
pub type EvaluationId = i64;

/// Identifier of a student managed outside this system.
pub type StudentId = i64;

/// Composite business key of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvaluationKey {
    pub week: String,
    pub student_id: StudentId,
    pub evaluation_type: String,
}

impl EvaluationKey {
    /// Build a key from its three components.
    ///
    /// # Examples
    /// ```
    /// use evaluations::domain::EvaluationKey;
    ///
    /// let key = EvaluationKey::new("2024-W10", 5, "quiz");
    /// assert_eq!(key.student_id, 5);
    /// ```
    pub fn new(
        week: impl Into<String>,
        student_id: StudentId,
        evaluation_type: impl Into<String>,
    ) -> Self {
        Self {
            week: week.into(),
            student_id,
            evaluation_type: evaluation_type.into(),
        }
    }
}

impl std::fmt::Display for EvaluationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.week, self.student_id, self.evaluation_type
        )
    }
}

/// Fields overwritten on every write for an existing key.
///
/// Missing optional values are written as null rather than merged with the
/// stored row; `absent` is false unless the caller says otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationFields {
    pub engagement: Option<String>,
    pub behavior: Option<i64>,
    pub absent: bool,
    pub date: String,
}

/// Everything needed to create an evaluation row.
///
/// `student_name` is captured on first write only; later writes for the same
/// key keep the stored name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationDraft {
    pub key: EvaluationKey,
    pub student_name: String,
    pub fields: EvaluationFields,
}

/// A persisted evaluation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub week: String,
    pub student_id: StudentId,
    pub student_name: String,
    pub evaluation_type: String,
    pub engagement: Option<String>,
    pub behavior: Option<i64>,
    pub absent: bool,
    pub date: String,
}

impl Evaluation {
    /// Business key of this row.
    pub fn key(&self) -> EvaluationKey {
        EvaluationKey::new(
            self.week.clone(),
            self.student_id,
            self.evaluation_type.clone(),
        )
    }
}

/// Result of writing an evaluation by business key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row existed for the key; a new one was inserted.
    Created { id: EvaluationId },
    /// A row existed for the key; its mutable fields were overwritten.
    Updated { id: EvaluationId },
}

impl UpsertOutcome {
    /// Surrogate id of the written row.
    pub fn id(&self) -> EvaluationId {
        match self {
            Self::Created { id } | Self::Updated { id } => *id,
        }
    }

    /// Whether the write inserted a new row.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(UpsertOutcome::Created { id: 7 }, 7, true)]
    #[case(UpsertOutcome::Updated { id: 3 }, 3, false)]
    fn outcome_exposes_id_and_kind(
        #[case] outcome: UpsertOutcome,
        #[case] id: EvaluationId,
        #[case] created: bool,
    ) {
        assert_eq!(outcome.id(), id);
        assert_eq!(outcome.is_created(), created);
    }

    #[rstest]
    fn key_round_trips_from_row() {
        let evaluation = Evaluation {
            id: 9,
            week: "2024-W11".to_owned(),
            student_id: 2,
            student_name: "B".to_owned(),
            evaluation_type: "oral".to_owned(),
            engagement: Some("focused".to_owned()),
            behavior: None,
            absent: true,
            date: "2024-03-11".to_owned(),
        };

        assert_eq!(evaluation.key(), EvaluationKey::new("2024-W11", 2, "oral"));
        assert_eq!(evaluation.key().to_string(), "2024-W11/2/oral");
    }
}
