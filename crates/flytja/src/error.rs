//! Common error types for flytja.

use thiserror::Error;

/// Errors that abort an export run.
///
/// Tokenizer-artifact failures are deliberately absent from this taxonomy:
/// they degrade the bundle instead of aborting, and are caught and logged
/// inside [`crate::tokenizer::artifacts`].
#[derive(Debug, Error)]
pub enum ExportError {
    /// Checkpoint could not be resolved or its metadata fetched.
    #[error("Failed to load checkpoint '{model}': {source}")]
    CheckpointNotFound {
        model: String,
        #[source]
        source: anyhow::Error,
    },

    /// No export configuration exists for the architecture, even after the
    /// sequence-classification fallback lookup.
    #[error(
        "No export configuration for architecture '{0}': cannot synthesize an input schema"
    )]
    NoExportConfig(String),

    /// Dummy inputs do not satisfy the export configuration's input schema.
    #[error("Invalid dummy inputs: {0}")]
    InvalidDummyInputs(String),

    /// Graph serialization failed.
    #[error("Graph export failed: {source}")]
    GraphExportFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Manifest could not be written.
    #[error("Failed to write manifest: {source}")]
    ManifestWriteFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Output directory could not be created or written to.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
