//! Error types for workshop collaborators.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for workshop operations.
pub type WorkshopResult<T> = Result<T, WorkshopError>;

/// Errors raised by the workshop's progress, outline and playground stores.
#[derive(Debug, Error)]
pub enum WorkshopError {
    /// The workshop manifest could not be read.
    #[error("failed to read workshop manifest: {path}")]
    ManifestRead {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The workshop manifest is not valid JSON for the expected shape.
    #[error("failed to parse workshop manifest: {path}")]
    ManifestParse {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The manifest parsed but describes an impossible course.
    #[error("invalid workshop manifest: {message}")]
    InvalidManifest {
        /// Description of the problem.
        message: String,
    },

    /// No progress record has the given lesson slug.
    #[error("no lesson with slug '{slug}'")]
    LessonNotFound {
        /// The slug that was looked up.
        slug: String,
    },

    /// Progress tracking is not available (for example, the learner is not signed in).
    #[error("progress tracking is unavailable: {message}")]
    ProgressUnavailable {
        /// Why it is unavailable.
        message: String,
    },
}
