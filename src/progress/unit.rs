//! Course units and their position in the learning path.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a step app is the starting point or the reference solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// The exercise step as the learner starts it.
    Problem,
    /// The finished reference implementation of the step.
    Solution,
}

impl StepKind {
    /// Returns the lowercase name used in tool arguments and app names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Problem => "problem",
            Self::Solution => "solution",
        }
    }

    /// Parses a kind from a tool argument (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "problem" => Some(Self::Problem),
            "solution" => Some(Self::Solution),
            _ => None,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinates of one problem or solution app within the course.
///
/// This is also what the playground points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCoordinates {
    /// Exercise number (1-based).
    pub exercise_number: u32,
    /// Step number within the exercise (1-based).
    pub step_number: u32,
    /// Problem or solution.
    #[serde(rename = "type")]
    pub kind: StepKind,
}

impl StepCoordinates {
    /// Creates new step coordinates.
    #[must_use]
    pub const fn new(exercise_number: u32, step_number: u32, kind: StepKind) -> Self {
        Self {
            exercise_number,
            step_number,
            kind,
        }
    }

    /// Creates coordinates for the problem app of a step.
    #[must_use]
    pub const fn problem(exercise_number: u32, step_number: u32) -> Self {
        Self::new(exercise_number, step_number, StepKind::Problem)
    }

    /// Creates coordinates for the solution app of a step.
    #[must_use]
    pub const fn solution(exercise_number: u32, step_number: u32) -> Self {
        Self::new(exercise_number, step_number, StepKind::Solution)
    }
}

impl fmt::Display for StepCoordinates {
    /// Formats as the app name, e.g. `01.02.problem`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}.{:02}.{}",
            self.exercise_number, self.step_number, self.kind
        )
    }
}

/// The playground is always pointed at exactly one step app.
pub type PlaygroundPointer = StepCoordinates;

/// A trackable piece of course content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Workshop introduction, before every exercise.
    WorkshopIntro,
    /// Workshop wrap-up, after every exercise.
    WorkshopOutro,
    /// Introduction of an exercise.
    ExerciseIntro(u32),
    /// Wrap-up of an exercise.
    ExerciseOutro(u32),
    /// A problem or solution step of an exercise.
    ExerciseStep(StepCoordinates),
    /// The progress feed could not classify this lesson.
    Unknown,
    /// The record's shape is outside the known vocabulary.
    Unrecognized,
}

/// Rank of [`Unit::WorkshopOutro`].
pub const WORKSHOP_OUTRO_RANK: i64 = 10_000;

/// Rank of [`Unit::Unknown`].
pub const UNKNOWN_RANK: i64 = 100_000;

/// Rank of [`Unit::Unrecognized`]. Sorts before everything else.
pub const UNRECOGNIZED_RANK: i64 = -1;

impl Unit {
    /// Total-order key along the learning path.
    ///
    /// Exercise `n` occupies `n * 100 ..= n * 100 + 100`: intro at the bottom,
    /// steps by number, outro at the top. The step kind does not affect the
    /// rank, so a step's problem and solution tie.
    #[must_use]
    #[allow(clippy::cast_lossless)] // i64::from is not const
    pub const fn rank(&self) -> i64 {
        match *self {
            Self::WorkshopIntro => 0,
            Self::ExerciseIntro(n) => n as i64 * 100,
            Self::ExerciseStep(StepCoordinates {
                exercise_number,
                step_number,
                ..
            }) => exercise_number as i64 * 100 + step_number as i64,
            Self::ExerciseOutro(n) => n as i64 * 100 + 100,
            Self::WorkshopOutro => WORKSHOP_OUTRO_RANK,
            Self::Unknown => UNKNOWN_RANK,
            Self::Unrecognized => UNRECOGNIZED_RANK,
        }
    }

    /// Returns `true` for units the learner has no way to act on.
    #[must_use]
    pub const fn is_unclassified(&self) -> bool {
        matches!(self, Self::Unknown | Self::Unrecognized)
    }

    /// Returns the exercise this unit belongs to, if any.
    #[must_use]
    pub const fn exercise_number(&self) -> Option<u32> {
        match *self {
            Self::ExerciseIntro(n) | Self::ExerciseOutro(n) => Some(n),
            Self::ExerciseStep(c) => Some(c.exercise_number),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkshopIntro => f.write_str("workshop intro"),
            Self::WorkshopOutro => f.write_str("workshop outro"),
            Self::ExerciseIntro(n) => write!(f, "exercise {n:02} intro"),
            Self::ExerciseOutro(n) => write!(f, "exercise {n:02} outro"),
            Self::ExerciseStep(c) => write!(
                f,
                "exercise {:02} step {:02}",
                c.exercise_number, c.step_number
            ),
            Self::Unknown => f.write_str("unknown lesson"),
            Self::Unrecognized => f.write_str("unrecognised lesson"),
        }
    }
}
