//! Workshop manifest loading.
//!
//! The manifest is a JSON snapshot of everything the server needs about one
//! workshop:
//!
//! ```json
//! {
//!   "title": "Web Forms",
//!   "subtitle": "Accessible, progressively enhanced forms",
//!   "product": { "host": "www.epicweb.dev", "slug": "web-forms" },
//!   "exercises": [
//!     { "exerciseNumber": 1, "title": "Basics", "steps": [
//!       { "stepNumber": 1,
//!         "problem": { "title": "Form action", "fullPath": "exercises/01.basics/01.problem" },
//!         "solution": { "title": "Form action", "fullPath": "exercises/01.basics/01.solution" } }
//!     ] }
//!   ],
//!   "progress": [ { "type": "workshop-instructions", "epicLessonSlug": "intro", "epicCompletedAt": null } ],
//!   "playground": { "exerciseNumber": 1, "stepNumber": 1, "type": "problem" },
//!   "notifications": { "remote": [], "local": [] }
//! }
//! ```
//!
//! `progress` is `null` (or absent) when the learner is not signed in.

use std::path::Path;

use serde::Deserialize;

use super::error::{WorkshopError, WorkshopResult};
use crate::notifications::{Notification, ProductRef};
use crate::progress::{CourseOutline, PlaygroundPointer, ProgressRecord};

/// Descriptive information about a workshop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopInfo {
    /// Workshop title.
    pub title: String,
    /// One-line description.
    pub subtitle: String,
    /// The product the workshop is sold as.
    pub product: ProductRef,
}

/// Notifications shipped with the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationLists {
    /// Last snapshot of the shared notification feed.
    #[serde(default)]
    pub remote: Vec<Notification>,
    /// Notifications defined by this workshop.
    #[serde(default)]
    pub local: Vec<Notification>,
}

/// Root manifest structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkshopManifest {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Workshop title.
    pub title: String,

    /// One-line description.
    #[serde(default)]
    pub subtitle: String,

    /// The product the workshop is sold as.
    pub product: ProductRef,

    /// Exercises in course order.
    #[serde(default)]
    pub exercises: CourseOutline,

    /// The learner's progress, if tracked.
    #[serde(default)]
    pub progress: Option<Vec<ProgressRecord>>,

    /// Where the playground starts out pointing.
    #[serde(default)]
    pub playground: Option<PlaygroundPointer>,

    /// Notifications.
    #[serde(default)]
    pub notifications: NotificationLists,
}

impl WorkshopManifest {
    /// Returns the descriptive part of the manifest.
    #[must_use]
    pub fn info(&self) -> WorkshopInfo {
        WorkshopInfo {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            product: self.product.clone(),
        }
    }

    /// Validates the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the outline numbering is broken or the initial
    /// playground points at a step app that does not exist.
    pub fn validate(&self) -> WorkshopResult<()> {
        if self.title.trim().is_empty() {
            return Err(WorkshopError::InvalidManifest {
                message: "title must not be empty".to_string(),
            });
        }

        if let Some(message) = self.exercises.validate() {
            return Err(WorkshopError::InvalidManifest { message });
        }

        if let Some(pointer) = self.playground {
            if self.exercises.find_step(pointer).is_none() {
                return Err(WorkshopError::InvalidManifest {
                    message: format!("playground points at missing app {pointer}"),
                });
            }
        }

        Ok(())
    }
}

/// Loads, parses and validates a workshop manifest.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is malformed, or fails
/// validation.
pub fn load_manifest(path: &Path) -> WorkshopResult<WorkshopManifest> {
    let contents = std::fs::read_to_string(path).map_err(|e| WorkshopError::ManifestRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let manifest: WorkshopManifest =
        serde_json::from_str(&contents).map_err(|e| WorkshopError::ManifestParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    manifest.validate()?;

    tracing::debug!(
        path = %path.display(),
        exercises = manifest.exercises.exercises.len(),
        progress_tracked = manifest.progress.is_some(),
        "Loaded workshop manifest"
    );

    Ok(manifest)
}
