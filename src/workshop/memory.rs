//! In-memory workshop backed by a loaded manifest.
//!
//! Updates (playground moves, completion marks) live for the lifetime of the
//! process and are never written back to the manifest.

use std::path::Path;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use super::error::{WorkshopError, WorkshopResult};
use super::manifest::{load_manifest, WorkshopInfo, WorkshopManifest};
use super::{
    NotificationSource, OutlineProvider, PlaygroundStore, ProgressReporter, ProgressSource,
    Workshop,
};
use crate::notifications::Notification;
use crate::progress::{CourseOutline, Exercise, PlaygroundPointer, ProgressRecord};

/// A workshop held entirely in memory.
#[derive(Debug)]
pub struct InMemoryWorkshop {
    info: WorkshopInfo,
    outline: CourseOutline,
    progress: RwLock<Option<Vec<ProgressRecord>>>,
    playground: RwLock<Option<PlaygroundPointer>>,
    remote_notifications: Vec<Notification>,
    local_notifications: Vec<Notification>,
}

impl InMemoryWorkshop {
    /// Creates a workshop from a parsed manifest.
    #[must_use]
    pub fn from_manifest(manifest: WorkshopManifest) -> Self {
        Self {
            info: manifest.info(),
            outline: manifest.exercises,
            progress: RwLock::new(manifest.progress),
            playground: RwLock::new(manifest.playground),
            remote_notifications: manifest.notifications.remote,
            local_notifications: manifest.notifications.local,
        }
    }

    /// Loads a workshop from a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be loaded or is invalid.
    pub fn load(path: &Path) -> WorkshopResult<Self> {
        load_manifest(path).map(Self::from_manifest)
    }
}

impl ProgressSource for InMemoryWorkshop {
    fn get_progress(&self) -> WorkshopResult<Option<Vec<ProgressRecord>>> {
        Ok(self
            .progress
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

impl OutlineProvider for InMemoryWorkshop {
    fn get_exercises(&self) -> CourseOutline {
        self.outline.clone()
    }

    fn get_exercise(&self, exercise_number: u32) -> Option<Exercise> {
        self.outline.exercise(exercise_number).cloned()
    }
}

impl PlaygroundStore for InMemoryWorkshop {
    fn get_playground_pointer(&self) -> Option<PlaygroundPointer> {
        *self.playground.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_playground_pointer(&self, pointer: PlaygroundPointer) -> WorkshopResult<()> {
        *self
            .playground
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(pointer);
        tracing::debug!(app = %pointer, "Playground pointer updated");
        Ok(())
    }
}

impl ProgressReporter for InMemoryWorkshop {
    fn update_progress(&self, lesson_slug: &str, complete: bool) -> WorkshopResult<()> {
        let mut guard = self
            .progress
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(records) = guard.as_mut() else {
            return Err(WorkshopError::ProgressUnavailable {
                message: "the learner is not logged in".to_string(),
            });
        };

        let completed_at = complete.then(Utc::now);
        let mut matched = 0_usize;
        for record in records.iter_mut().filter(|r| r.lesson_slug == lesson_slug) {
            record.completed_at = completed_at;
            matched += 1;
        }

        if matched == 0 {
            return Err(WorkshopError::LessonNotFound {
                slug: lesson_slug.to_string(),
            });
        }

        tracing::info!(lesson_slug, complete, "Lesson progress updated");
        Ok(())
    }
}

impl NotificationSource for InMemoryWorkshop {
    fn remote_notifications(&self) -> Vec<Notification> {
        self.remote_notifications.clone()
    }

    fn local_notifications(&self) -> Vec<Notification> {
        self.local_notifications.clone()
    }
}

impl Workshop for InMemoryWorkshop {
    fn info(&self) -> &WorkshopInfo {
        &self.info
    }
}
