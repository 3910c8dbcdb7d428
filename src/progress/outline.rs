//! The ordered structure of a workshop's exercises and steps.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::unit::{StepCoordinates, StepKind};

/// One side (problem or solution) of an exercise step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepApp {
    /// Title shown in summaries.
    pub title: String,
    /// Location of the app's content, passed through to callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_path: Option<PathBuf>,
}

impl StepApp {
    /// Creates an app with a title and no content path.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            full_path: None,
        }
    }
}

/// A numbered step of an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Step number within the exercise (1-based).
    pub step_number: u32,
    /// The problem app, if the step has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<StepApp>,
    /// The solution app, if the step has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<StepApp>,
}

impl Step {
    /// Creates a step with both a problem and a solution.
    #[must_use]
    pub fn new(step_number: u32, title: &str) -> Self {
        Self {
            step_number,
            problem: Some(StepApp::new(title)),
            solution: Some(StepApp::new(title)),
        }
    }

    /// Returns the app for the given kind.
    #[must_use]
    pub const fn app(&self, kind: StepKind) -> Option<&StepApp> {
        match kind {
            StepKind::Problem => self.problem.as_ref(),
            StepKind::Solution => self.solution.as_ref(),
        }
    }

    /// Title of the step, preferring the problem's.
    #[must_use]
    pub fn title(&self) -> &str {
        self.problem
            .as_ref()
            .or(self.solution.as_ref())
            .map_or("No title", |app| app.title.as_str())
    }
}

/// A numbered exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Exercise number (1-based).
    pub exercise_number: u32,
    /// Exercise title.
    pub title: String,
    /// Steps in course order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Exercise {
    /// Creates an exercise with no steps.
    #[must_use]
    pub fn new(exercise_number: u32, title: impl Into<String>) -> Self {
        Self {
            exercise_number,
            title: title.into(),
            steps: Vec::new(),
        }
    }

    /// Appends a step.
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Finds a step by number.
    #[must_use]
    pub fn step(&self, step_number: u32) -> Option<&Step> {
        self.steps.iter().find(|s| s.step_number == step_number)
    }
}

/// All exercises of a workshop, in course order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseOutline {
    /// Exercises in course order.
    pub exercises: Vec<Exercise>,
}

impl CourseOutline {
    /// Creates an outline from exercises already in course order.
    #[must_use]
    pub const fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    /// Finds an exercise by number.
    #[must_use]
    pub fn exercise(&self, exercise_number: u32) -> Option<&Exercise> {
        self.exercises
            .iter()
            .find(|e| e.exercise_number == exercise_number)
    }

    /// Finds the step at the given coordinates, if that step has an app of
    /// the requested kind.
    #[must_use]
    pub fn find_step(&self, coords: StepCoordinates) -> Option<&Step> {
        self.exercise(coords.exercise_number)?
            .step(coords.step_number)
            .filter(|step| step.app(coords.kind).is_some())
    }

    /// Flattens the outline into every existing step app, in course order
    /// (each step's problem before its solution).
    #[must_use]
    pub fn step_units(&self) -> Vec<StepCoordinates> {
        let mut units = Vec::new();
        for exercise in &self.exercises {
            for step in &exercise.steps {
                for kind in [StepKind::Problem, StepKind::Solution] {
                    if step.app(kind).is_some() {
                        units.push(StepCoordinates::new(
                            exercise.exercise_number,
                            step.step_number,
                            kind,
                        ));
                    }
                }
            }
        }
        units
    }

    /// Checks the outline's numbering.
    ///
    /// Returns a description of the first problem found.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        let mut seen_exercises = Vec::with_capacity(self.exercises.len());
        for exercise in &self.exercises {
            let n = exercise.exercise_number;
            if n == 0 {
                return Some(format!("exercise '{}' has number 0", exercise.title));
            }
            if seen_exercises.contains(&n) {
                return Some(format!("exercise number {n} appears more than once"));
            }
            seen_exercises.push(n);

            let mut seen_steps = Vec::with_capacity(exercise.steps.len());
            for step in &exercise.steps {
                let s = step.step_number;
                if s == 0 {
                    return Some(format!("exercise {n} has a step numbered 0"));
                }
                if seen_steps.contains(&s) {
                    return Some(format!("exercise {n} step {s} appears more than once"));
                }
                if step.problem.is_none() && step.solution.is_none() {
                    return Some(format!("exercise {n} step {s} has neither problem nor solution"));
                }
                seen_steps.push(s);
            }
        }
        None
    }
}
