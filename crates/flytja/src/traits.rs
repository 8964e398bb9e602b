//! Seams to the checkpoint-loading and graph-export collaborators.
//!
//! Both subsystems are consumed through narrow traits so the pipeline's
//! real logic (configuration resolution, fallback tokenizer construction,
//! artifact completeness) stays testable with fake implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use serde::Deserialize;

use crate::error::ExportError;
use crate::export::{DummyInputs, ExportConfig};

/// Architecture metadata parsed from a checkpoint's `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchitectureMetadata {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default = "default_hidden_size")]
    pub hidden_size: usize,
    #[serde(default)]
    pub max_position_embeddings: Option<usize>,
}

fn default_hidden_size() -> usize {
    768
}

impl ArchitectureMetadata {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing config.json")
    }

    /// `model_type`, defaulting to `bert` for encoder checkpoints that
    /// predate the field.
    pub fn model_type_or_default(&self) -> &str {
        self.model_type.as_deref().unwrap_or("bert")
    }
}

/// Opaque handle to a checkpoint's serialized computation graph.
#[derive(Debug, Clone)]
pub struct GraphModel {
    /// Checkpoint identifier the graph came from.
    pub model_id: String,
    /// Local directory holding the checkpoint's cached files.
    pub local_dir: PathBuf,
}

/// Native tokenizer descriptor files shipped with a checkpoint.
#[derive(Debug, Clone, Default)]
pub struct NativeTokenizer {
    files: Vec<(String, PathBuf)>,
}

impl NativeTokenizer {
    /// Register a descriptor file under its bundle name.
    pub fn push(&mut self, name: &str, source: PathBuf) {
        self.files.push((name.to_string(), source));
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Copy the descriptor files into `out_dir`, skipping names that
    /// already exist there.
    pub fn save_files(&self, out_dir: &Path) -> Result<()> {
        for (name, source) in &self.files {
            let dest = out_dir.join(name);
            if dest.exists() {
                continue;
            }
            fs::copy(source, &dest)
                .with_context(|| format!("copying {} to {}", source.display(), dest.display()))?;
            info!("Saved {}", dest.display());
        }
        Ok(())
    }
}

/// Everything a resolved checkpoint yields.
#[derive(Debug)]
pub struct Checkpoint {
    pub graph: GraphModel,
    pub tokenizer: Option<NativeTokenizer>,
    pub metadata: ArchitectureMetadata,
}

/// Resolves a checkpoint reference into a graph, an optional native
/// tokenizer and architecture metadata.
#[async_trait]
pub trait CheckpointLoader: Send + Sync {
    async fn load(&self, model: &str) -> Result<Checkpoint, ExportError>;
}

/// Serializes a computation graph under the export configuration's opset
/// to the destination path.
#[async_trait]
pub trait GraphExporter: Send + Sync {
    async fn export(
        &self,
        graph: &GraphModel,
        config: &ExportConfig,
        dummy_inputs: &DummyInputs,
        dest: &Path,
    ) -> Result<(), ExportError>;
}
