//! The workshop the resolver works against.
//!
//! The resolver in [`crate::progress`] only computes. Everything it needs is
//! fetched through the traits here, and the MCP tools write the results back
//! through them:
//!
//! | Trait                | Provides                                  |
//! |----------------------|-------------------------------------------|
//! | [`ProgressSource`]   | the learner's progress records            |
//! | [`OutlineProvider`]  | exercises and steps in course order       |
//! | [`PlaygroundStore`]  | the step app the playground points at     |
//! | [`ProgressReporter`] | marking lessons complete or incomplete    |
//! | [`NotificationSource`] | shared-feed and workshop notifications  |
//!
//! [`InMemoryWorkshop`] implements all of them from a [`WorkshopManifest`].

pub mod error;
pub mod manifest;
pub mod memory;

pub use error::{WorkshopError, WorkshopResult};
pub use manifest::{load_manifest, NotificationLists, WorkshopInfo, WorkshopManifest};
pub use memory::InMemoryWorkshop;

use crate::notifications::Notification;
use crate::progress::{CourseOutline, Exercise, PlaygroundPointer, ProgressRecord};

/// Source of the learner's progress records.
pub trait ProgressSource {
    /// Returns the progress records in no particular order.
    ///
    /// `Ok(None)` means progress is not tracked for this learner (for
    /// example, they are not signed in).
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be fetched.
    fn get_progress(&self) -> WorkshopResult<Option<Vec<ProgressRecord>>>;
}

/// Source of the course structure.
pub trait OutlineProvider {
    /// Returns every exercise in course order.
    fn get_exercises(&self) -> CourseOutline;

    /// Returns one exercise by number.
    fn get_exercise(&self, exercise_number: u32) -> Option<Exercise>;
}

/// Owner of the playground pointer.
pub trait PlaygroundStore {
    /// Returns the step app the playground is set to, if any.
    fn get_playground_pointer(&self) -> Option<PlaygroundPointer>;

    /// Points the playground at a step app.
    ///
    /// # Errors
    ///
    /// Returns an error if the pointer cannot be stored.
    fn set_playground_pointer(&self, pointer: PlaygroundPointer) -> WorkshopResult<()>;
}

/// Sink for completion updates.
pub trait ProgressReporter {
    /// Marks the lesson with `lesson_slug` complete or incomplete.
    ///
    /// # Errors
    ///
    /// Returns an error if the lesson is unknown or progress is not tracked.
    fn update_progress(&self, lesson_slug: &str, complete: bool) -> WorkshopResult<()>;
}

/// Source of workshop notifications.
pub trait NotificationSource {
    /// Notifications from the shared feed, unfiltered.
    fn remote_notifications(&self) -> Vec<Notification>;

    /// Notifications defined by the workshop itself.
    fn local_notifications(&self) -> Vec<Notification>;
}

/// Everything the MCP tools need from a workshop.
pub trait Workshop:
    ProgressSource + OutlineProvider + PlaygroundStore + ProgressReporter + NotificationSource
{
    /// Title, subtitle and product of the workshop.
    fn info(&self) -> &WorkshopInfo;
}
