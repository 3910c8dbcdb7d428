//! Course progress ranking and next-step resolution.
//!
//! A workshop is a sequence of units:
//!
//! ```text
//! workshop intro
//!   exercise 1 intro
//!     step 1.1 (problem, solution)
//!     step 1.2 (problem, solution)
//!   exercise 1 outro
//!   exercise 2 intro
//!     ...
//! workshop outro
//! ```
//!
//! The progress feed reports completion for these units in no particular
//! order. [`Unit::rank`] gives each unit its position on the learning path,
//! and the resolver answers three questions from that:
//!
//! - [`next_incomplete`]: what should the learner do next?
//! - [`resolve_coordinates`]: which step app does a (partial) request mean?
//! - [`advance_playground`]: which problem app follows the current one?

pub mod error;
pub mod outline;
pub mod record;
pub mod resolver;
pub mod unit;

pub use error::{ResolveError, ResolveResult};
pub use outline::{CourseOutline, Exercise, Step, StepApp};
pub use record::ProgressRecord;
pub use resolver::{
    advance_playground, next_incomplete, resolve_coordinates, sorted_by_rank, CoordinateRequest,
};
pub use unit::{PlaygroundPointer, StepCoordinates, StepKind, Unit};
