//! Error types for progress resolution.

use thiserror::Error;

use super::unit::StepKind;

/// Result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Conditions the resolver reports back to its caller.
///
/// "Every unit is complete" is not among them: that is `Ok(None)` from
/// [`next_incomplete`](super::next_incomplete).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The next incomplete record could not be classified.
    #[error("the next incomplete lesson ({lesson_slug}) could not be classified")]
    UnknownUnitEncountered {
        /// Slug of the offending lesson.
        lesson_slug: String,
        /// URL of the offending lesson.
        lesson_url: String,
    },

    /// Not enough coordinates were given and there is no playground to default from.
    #[error(
        "cannot determine the exercise step: provide exerciseNumber, stepNumber and type, \
         or set the playground first"
    )]
    AmbiguousCoordinates,

    /// The coordinates do not match any app in the course outline.
    #[error("no app found for {exercise_number:02}.{step_number:02}.{kind}")]
    NotFound {
        /// Requested exercise number.
        exercise_number: u32,
        /// Requested step number.
        step_number: u32,
        /// Requested step kind.
        kind: StepKind,
    },

    /// There is no problem step after the current one.
    #[error("no next problem app found to set the playground to")]
    NoNextStep,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_uses_app_name() {
        let err = ResolveError::NotFound {
            exercise_number: 2,
            step_number: 3,
            kind: StepKind::Solution,
        };
        assert_eq!(err.to_string(), "no app found for 02.03.solution");
    }

    #[test]
    fn unknown_unit_display_names_slug() {
        let err = ResolveError::UnknownUnitEncountered {
            lesson_slug: "mystery-lesson".to_string(),
            lesson_url: "https://example.com/mystery".to_string(),
        };
        assert!(err.to_string().contains("mystery-lesson"));
    }
}
