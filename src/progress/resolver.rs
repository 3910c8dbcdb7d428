//! Next-step resolution over progress records and the course outline.
//!
//! Every function here is pure: the caller fetches progress, the outline and
//! the playground pointer first and passes them in.

use super::error::{ResolveError, ResolveResult};
use super::outline::CourseOutline;
use super::record::ProgressRecord;
use super::unit::{PlaygroundPointer, StepCoordinates, StepKind};

/// Returns the records ordered along the learning path.
///
/// The sort is stable: records with equal rank keep their input order.
#[must_use]
pub fn sorted_by_rank(records: &[ProgressRecord]) -> Vec<&ProgressRecord> {
    let mut sorted: Vec<&ProgressRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.unit.rank());
    sorted
}

/// Finds the first incomplete record along the learning path.
///
/// Returns `Ok(None)` when `records` is empty or everything is complete.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownUnitEncountered`] when the first
/// incomplete record is one the feed could not classify.
pub fn next_incomplete(records: &[ProgressRecord]) -> ResolveResult<Option<&ProgressRecord>> {
    let Some(next) = sorted_by_rank(records)
        .into_iter()
        .find(|r| !r.is_complete())
    else {
        return Ok(None);
    };

    if next.unit.is_unclassified() {
        return Err(ResolveError::UnknownUnitEncountered {
            lesson_slug: next.lesson_slug.clone(),
            lesson_url: next.lesson_url.clone(),
        });
    }

    Ok(Some(next))
}

/// Partially specified step coordinates, as a caller supplies them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinateRequest {
    /// Requested exercise number.
    pub exercise_number: Option<u32>,
    /// Requested step number.
    pub step_number: Option<u32>,
    /// Requested step kind.
    pub kind: Option<StepKind>,
}

impl CoordinateRequest {
    /// Returns `true` if no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.exercise_number.is_none() && self.step_number.is_none() && self.kind.is_none()
    }
}

/// Resolves explicit or partial coordinates to a step app in the outline.
///
/// Each field missing from `request` is taken from `current`.
///
/// # Errors
///
/// - [`ResolveError::AmbiguousCoordinates`] if a field is still missing after
///   defaulting.
/// - [`ResolveError::NotFound`] if the outline has no such step app.
pub fn resolve_coordinates(
    outline: &CourseOutline,
    current: Option<PlaygroundPointer>,
    request: CoordinateRequest,
) -> ResolveResult<StepCoordinates> {
    let exercise_number = request
        .exercise_number
        .or(current.map(|c| c.exercise_number));
    let step_number = request.step_number.or(current.map(|c| c.step_number));
    let kind = request.kind.or(current.map(|c| c.kind));

    let (Some(exercise_number), Some(step_number), Some(kind)) = (exercise_number, step_number, kind)
    else {
        return Err(ResolveError::AmbiguousCoordinates);
    };

    let coords = StepCoordinates::new(exercise_number, step_number, kind);
    if outline.find_step(coords).is_none() {
        return Err(ResolveError::NotFound {
            exercise_number,
            step_number,
            kind,
        });
    }

    Ok(coords)
}

/// Finds the next problem app after `current` in `step_units`.
///
/// `step_units` is the outline-ordered sequence from
/// [`CourseOutline::step_units`]. When `current` is `None` or not part of the
/// sequence, the scan starts from the beginning.
///
/// # Errors
///
/// Returns [`ResolveError::NoNextStep`] when no problem app follows.
pub fn advance_playground(
    step_units: &[StepCoordinates],
    current: Option<PlaygroundPointer>,
) -> ResolveResult<StepCoordinates> {
    let start = current
        .and_then(|c| step_units.iter().position(|u| *u == c))
        .map_or(0, |i| i + 1);

    step_units[start..]
        .iter()
        .find(|u| u.kind == StepKind::Problem)
        .copied()
        .ok_or(ResolveError::NoNextStep)
}
