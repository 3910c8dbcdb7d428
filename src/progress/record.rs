//! Progress records as delivered by the course-tracking feed.
//!
//! The feed tags each lesson with a `type` and, where it applies, an exercise
//! and step number:
//!
//! ```json
//! {
//!   "id": "lesson-42",
//!   "type": "step",
//!   "exerciseNumber": 1,
//!   "stepNumber": 2,
//!   "epicLessonSlug": "fetching-data",
//!   "epicLessonUrl": "https://example.com/workshops/x/fetching-data",
//!   "epicCompletedAt": null
//! }
//! ```
//!
//! Records whose shape does not fit (an unknown `type`, a missing or zero
//! exercise number) decode to [`Unit::Unrecognized`] instead of failing, so
//! one malformed lesson does not hide the rest of the feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::unit::{StepCoordinates, Unit};

/// One lesson's completion status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireRecord", into = "WireRecord")]
pub struct ProgressRecord {
    /// Source-provided identifier.
    pub id: String,
    /// The course unit this lesson tracks.
    pub unit: Unit,
    /// When the lesson was completed, or `None` if it is still open.
    pub completed_at: Option<DateTime<Utc>>,
    /// Slug used when reporting completion.
    pub lesson_slug: String,
    /// Where the learner can watch the lesson.
    pub lesson_url: String,
    /// The feed's own shape, kept for [`Unit::Unrecognized`] records so they
    /// serialise back unchanged.
    unrecognized: Option<RawShape>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RawShape {
    lesson_type: String,
    exercise_number: Option<u32>,
    step_number: Option<u32>,
}

impl ProgressRecord {
    /// Creates an incomplete record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        unit: Unit,
        lesson_slug: impl Into<String>,
        lesson_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            unit,
            completed_at: None,
            lesson_slug: lesson_slug.into(),
            lesson_url: lesson_url.into(),
            unrecognized: None,
        }
    }

    /// The feed's `type` tag for a record that could not be classified.
    #[must_use]
    pub fn unrecognized_type(&self) -> Option<&str> {
        self.unrecognized.as_ref().map(|raw| raw.lesson_type.as_str())
    }

    /// Marks the record as completed at the given time.
    #[must_use]
    pub fn completed(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    /// Returns `true` if the lesson has been completed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// The feed's JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    lesson_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exercise_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    step_number: Option<u32>,
    #[serde(default)]
    epic_lesson_slug: String,
    #[serde(default)]
    epic_lesson_url: String,
    #[serde(default)]
    epic_completed_at: Option<DateTime<Utc>>,
}

fn positive(n: Option<u32>) -> Option<u32> {
    n.filter(|&n| n >= 1)
}

fn classify(lesson_type: &str, exercise: Option<u32>, step: Option<u32>) -> Unit {
    let exercise = positive(exercise);
    let step = positive(step);

    match (lesson_type, exercise, step) {
        ("workshop-instructions", _, _) => Unit::WorkshopIntro,
        ("workshop-finished", _, _) => Unit::WorkshopOutro,
        ("instructions", Some(n), _) => Unit::ExerciseIntro(n),
        ("finished", Some(n), _) => Unit::ExerciseOutro(n),
        // Completion is tracked per step, not per problem/solution app.
        ("step", Some(n), Some(s)) => Unit::ExerciseStep(StepCoordinates::problem(n, s)),
        ("unknown", _, _) => Unit::Unknown,
        _ => Unit::Unrecognized,
    }
}

impl From<WireRecord> for ProgressRecord {
    fn from(wire: WireRecord) -> Self {
        let unit = classify(&wire.lesson_type, wire.exercise_number, wire.step_number);
        let unrecognized = (unit == Unit::Unrecognized).then(|| {
            tracing::debug!(
                id = %wire.id,
                lesson_type = %wire.lesson_type,
                "Unrecognised progress record shape"
            );
            RawShape {
                lesson_type: wire.lesson_type,
                exercise_number: wire.exercise_number,
                step_number: wire.step_number,
            }
        });

        Self {
            id: wire.id,
            unit,
            completed_at: wire.epic_completed_at,
            lesson_slug: wire.epic_lesson_slug,
            lesson_url: wire.epic_lesson_url,
            unrecognized,
        }
    }
}

impl From<ProgressRecord> for WireRecord {
    fn from(record: ProgressRecord) -> Self {
        let (lesson_type, exercise_number, step_number) = match (record.unit, record.unrecognized) {
            (Unit::Unrecognized, Some(raw)) => (raw.lesson_type, raw.exercise_number, raw.step_number),
            (unit, _) => {
                let (tag, exercise, step) = match unit {
                    Unit::WorkshopIntro => ("workshop-instructions", None, None),
                    Unit::WorkshopOutro => ("workshop-finished", None, None),
                    Unit::ExerciseIntro(n) => ("instructions", Some(n), None),
                    Unit::ExerciseOutro(n) => ("finished", Some(n), None),
                    Unit::ExerciseStep(StepCoordinates {
                        exercise_number,
                        step_number,
                        ..
                    }) => ("step", Some(exercise_number), Some(step_number)),
                    Unit::Unknown => ("unknown", None, None),
                    Unit::Unrecognized => ("unrecognized", None, None),
                };
                (tag.to_string(), exercise, step)
            }
        };

        Self {
            id: record.id,
            lesson_type,
            exercise_number,
            step_number,
            epic_lesson_slug: record.lesson_slug,
            epic_lesson_url: record.lesson_url,
            epic_completed_at: record.completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ProgressRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parse_step_record() {
        let record = parse(
            r#"{
                "id": "l1",
                "type": "step",
                "exerciseNumber": 1,
                "stepNumber": 2,
                "epicLessonSlug": "fetching-data",
                "epicLessonUrl": "https://example.com/fetching-data",
                "epicCompletedAt": null
            }"#,
        );

        assert_eq!(record.unit, Unit::ExerciseStep(StepCoordinates::problem(1, 2)));
        assert_eq!(record.lesson_slug, "fetching-data");
        assert!(!record.is_complete());
    }

    #[test]
    fn parse_completed_timestamp() {
        let record = parse(
            r#"{"id": "l0", "type": "workshop-instructions", "epicLessonSlug": "intro",
                "epicLessonUrl": "u", "epicCompletedAt": "2024-05-01T10:00:00Z"}"#,
        );

        assert_eq!(record.unit, Unit::WorkshopIntro);
        assert!(record.is_complete());
    }

    #[test]
    fn parse_exercise_intro_and_outro() {
        let intro = parse(r#"{"type": "instructions", "exerciseNumber": 3}"#);
        let outro = parse(r#"{"type": "finished", "exerciseNumber": 3}"#);
        assert_eq!(intro.unit, Unit::ExerciseIntro(3));
        assert_eq!(outro.unit, Unit::ExerciseOutro(3));
    }

    #[test]
    fn parse_unknown_type() {
        let record = parse(r#"{"type": "unknown", "epicLessonSlug": "bonus"}"#);
        assert_eq!(record.unit, Unit::Unknown);
    }

    #[test]
    fn unexpected_shapes_are_unrecognized() {
        let cases = [
            r#"{"type": "quiz"}"#,
            r#"{"type": "step", "exerciseNumber": 1}"#,
            r#"{"type": "instructions"}"#,
            r#"{"type": "step", "exerciseNumber": 0, "stepNumber": 1}"#,
        ];

        for json in cases {
            assert_eq!(parse(json).unit, Unit::Unrecognized, "{json}");
        }
    }

    #[test]
    fn unrecognized_record_keeps_feed_shape() {
        let record = parse(
            r#"{"id": "q1", "type": "quiz", "exerciseNumber": 2, "epicLessonSlug": "pop-quiz"}"#,
        );
        assert_eq!(record.unit, Unit::Unrecognized);
        assert_eq!(record.unrecognized_type(), Some("quiz"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "quiz");
        assert_eq!(json["exerciseNumber"], 2);
        assert!(json.get("stepNumber").is_none());
        assert_eq!(json["epicLessonSlug"], "pop-quiz");
    }

    #[test]
    fn classified_records_carry_no_raw_shape() {
        let record = parse(r#"{"type": "instructions", "exerciseNumber": 1}"#);
        assert_eq!(record.unrecognized_type(), None);
    }

    #[test]
    fn serialise_uses_feed_field_names() {
        let record = ProgressRecord::new(
            "l7",
            Unit::ExerciseOutro(2),
            "exercise-2-outro",
            "https://example.com/2/outro",
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["type"], "finished");
        assert_eq!(json["exerciseNumber"], 2);
        assert_eq!(json["epicLessonSlug"], "exercise-2-outro");
        assert!(json["epicCompletedAt"].is_null());
        assert!(json.get("stepNumber").is_none());
    }
}
