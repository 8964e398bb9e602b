//! Export manifest.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ExportError, ExportResult};

/// Produced artifact filenames keyed by logical role.
///
/// `tokenizer` is `None` when no `tokenizer.json` could be produced, so
/// consumers can detect degraded bundles without probing the filesystem.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestFiles {
    pub onnx: String,
    pub tokenizer: Option<String>,
}

/// Metadata describing a produced bundle.
///
/// Written exactly once per run, after every other artifact was confirmed
/// or attempted, so it reflects actual bundle completeness.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub source_model: String,
    pub hidden_size: usize,
    pub max_position_embeddings: usize,
    pub feature: String,
    pub opset: u32,
    pub files: ManifestFiles,
}

impl Manifest {
    pub const FILE_NAME: &'static str = "metadata.json";

    pub fn write(&self, out_dir: &Path) -> ExportResult<PathBuf> {
        let path = out_dir.join(Self::FILE_NAME);
        let payload = serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::ManifestWriteFailed { source: e.into() })?;
        fs::write(&path, payload)?;
        Ok(path)
    }
}
