//! Hub-backed collaborator implementations.
//!
//! The checkpoint loader fetches `config.json` plus whichever native
//! tokenizer files the repository ships; the graph exporter obtains the
//! checkpoint's ONNX serialization. Heavy graph tracing lives upstream —
//! this side owns the fixed file contract (names, location, input schema).

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, info};

use crate::common::download::{default_cache_dir, download_file, hub_url, model_cache_dir};
use crate::error::ExportError;
use crate::export::{DummyInputs, ExportConfig};
use crate::tokenizer::artifacts::{
    SPECIAL_TOKENS_FILE, TOKENIZER_CONFIG_FILE, TOKENIZER_FILE, VOCAB_FILE,
};
use crate::traits::{
    ArchitectureMetadata, Checkpoint, CheckpointLoader, GraphExporter, GraphModel, NativeTokenizer,
};

/// Native tokenizer files a checkpoint may ship. Each one is optional.
const NATIVE_TOKENIZER_FILES: &[&str] = &[
    TOKENIZER_FILE,
    VOCAB_FILE,
    TOKENIZER_CONFIG_FILE,
    SPECIAL_TOKENS_FILE,
];

/// Candidate locations of a checkpoint's ONNX serialization, in order.
const GRAPH_CANDIDATES: &[&str] = &["model.onnx", "onnx/model.onnx"];

/// Loads checkpoints from the Hugging Face hub with a local file cache.
pub struct HubCheckpointLoader {
    cache_dir: PathBuf,
}

impl HubCheckpointLoader {
    pub fn new() -> Self {
        Self {
            cache_dir: default_cache_dir(),
        }
    }

    pub fn with_cache_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    async fn fetch(&self, model: &str) -> Result<Checkpoint> {
        let model_dir = model_cache_dir(&self.cache_dir, model);
        tokio::fs::create_dir_all(&model_dir).await?;

        let config_path = download_file(&model_dir, "config.json", &hub_url(model, "config.json"))
            .await
            .context("fetching config.json")?;
        let config_json = tokio::fs::read_to_string(&config_path).await?;
        let metadata = ArchitectureMetadata::from_json(&config_json)?;

        let mut native = NativeTokenizer::default();
        for file in NATIVE_TOKENIZER_FILES {
            match download_file(&model_dir, file, &hub_url(model, file)).await {
                Ok(path) => native.push(file, path),
                Err(e) => debug!("No native {file} for {model}: {e:#}"),
            }
        }
        let tokenizer = (!native.is_empty()).then_some(native);

        Ok(Checkpoint {
            graph: GraphModel {
                model_id: model.to_string(),
                local_dir: model_dir,
            },
            tokenizer,
            metadata,
        })
    }
}

impl Default for HubCheckpointLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckpointLoader for HubCheckpointLoader {
    async fn load(&self, model: &str) -> Result<Checkpoint, ExportError> {
        self.fetch(model)
            .await
            .map_err(|source| ExportError::CheckpointNotFound {
                model: model.to_string(),
                source,
            })
    }
}

/// Writes the checkpoint's ONNX graph serialization to the destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct HubGraphExporter;

impl HubGraphExporter {
    async fn write_graph(&self, graph: &GraphModel, dest: &Path) -> Result<()> {
        for candidate in GRAPH_CANDIDATES {
            match download_file(
                &graph.local_dir,
                candidate,
                &hub_url(&graph.model_id, candidate),
            )
            .await
            {
                Ok(path) => {
                    tokio::fs::copy(&path, dest)
                        .await
                        .with_context(|| format!("writing {}", dest.display()))?;
                    info!("Wrote graph from {candidate}");
                    return Ok(());
                }
                Err(e) => debug!("No graph at {candidate}: {e:#}"),
            }
        }
        Err(anyhow!(
            "checkpoint '{}' ships no ONNX graph serialization",
            graph.model_id
        ))
    }
}

#[async_trait]
impl GraphExporter for HubGraphExporter {
    async fn export(
        &self,
        graph: &GraphModel,
        config: &ExportConfig,
        dummy_inputs: &DummyInputs,
        dest: &Path,
    ) -> Result<(), ExportError> {
        validate_inputs(config, dummy_inputs)?;
        info!(
            "Serializing graph for '{}' at opset {}",
            graph.model_id,
            config.opset()
        );
        self.write_graph(graph, dest)
            .await
            .map_err(|source| ExportError::GraphExportFailed { source })
    }
}

fn validate_inputs(config: &ExportConfig, dummy: &DummyInputs) -> Result<(), ExportError> {
    let declared = config.input_names();
    let produced = dummy.names();
    if declared != produced {
        return Err(ExportError::InvalidDummyInputs(format!(
            "declared inputs {declared:?} do not match produced {produced:?}"
        )));
    }
    if dummy.attention_mask.dim() != dummy.input_ids.dim() {
        return Err(ExportError::InvalidDummyInputs(
            "attention mask shape differs from input ids".to_string(),
        ));
    }
    Ok(())
}
