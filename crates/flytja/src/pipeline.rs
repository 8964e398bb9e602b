//! Export pipeline orchestration.
//!
//! Linear, single-pass: load checkpoint, resolve export configuration,
//! synthesize dummy inputs, export the graph, resolve tokenizer artifacts,
//! write the manifest. The first four stages are fatal on failure; the
//! tokenizer stage degrades the bundle instead, and the manifest always
//! records what was actually produced.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use crate::error::ExportResult;
use crate::export::{ExportConfig, DUMMY_BATCH, DUMMY_SEQ_LEN};
use crate::manifest::{Manifest, ManifestFiles};
use crate::tokenizer::artifacts::{resolve_tokenizer_artifacts, TOKENIZER_FILE};
use crate::traits::{CheckpointLoader, GraphExporter};

/// File name of the exported graph.
pub const GRAPH_FILE: &str = "encoder.onnx";

/// Everything one export run needs to know.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Source checkpoint identifier.
    pub model: String,
    /// Destination directory, created recursively if absent.
    pub out_dir: PathBuf,
    /// Graph-export opset, passed through unmodified.
    pub opset: u32,
    /// Maximum sequence length for the tokenizer configuration; also the
    /// manifest fallback when the checkpoint declares no position count.
    pub max_len: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            model: "cointegrated/LaBSE-en-ru".to_string(),
            out_dir: PathBuf::from("/app/models"),
            opset: crate::export::DEFAULT_OPSET,
            max_len: 256,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub manifest: Manifest,
    pub graph_path: PathBuf,
    pub manifest_path: PathBuf,
    /// True when the tokenizer bundle came out incomplete.
    pub degraded: bool,
}

/// Top-level export driver over the two collaborator seams.
pub struct ExportPipeline<L, E> {
    loader: L,
    exporter: E,
}

impl<L: CheckpointLoader, E: GraphExporter> ExportPipeline<L, E> {
    pub fn new(loader: L, exporter: E) -> Self {
        Self { loader, exporter }
    }

    pub async fn run(&self, options: &ExportOptions) -> ExportResult<ExportReport> {
        fs::create_dir_all(&options.out_dir)?;

        info!("Loading checkpoint '{}'", options.model);
        let checkpoint = self.loader.load(&options.model).await?;

        let architecture = checkpoint.metadata.model_type_or_default();
        let config = ExportConfig::resolve(architecture, options.opset)?;
        info!(
            "Resolved export configuration: {} / {}",
            config.family(),
            config.feature()
        );

        let dummy_inputs = config.generate_dummy_inputs(DUMMY_BATCH, DUMMY_SEQ_LEN)?;

        let graph_path = options.out_dir.join(GRAPH_FILE);
        self.exporter
            .export(&checkpoint.graph, &config, &dummy_inputs, &graph_path)
            .await?;
        info!("Exported graph to {}", graph_path.display());

        let has_tokenizer = resolve_tokenizer_artifacts(
            &options.out_dir,
            checkpoint.tokenizer.as_ref(),
            options.max_len,
        );
        if !has_tokenizer {
            warn!("Bundle is incomplete: no {TOKENIZER_FILE} could be produced");
        }

        let manifest = Manifest {
            source_model: options.model.clone(),
            hidden_size: checkpoint.metadata.hidden_size,
            max_position_embeddings: checkpoint
                .metadata
                .max_position_embeddings
                .unwrap_or(options.max_len),
            feature: config.feature().to_string(),
            opset: config.opset(),
            files: ManifestFiles {
                onnx: GRAPH_FILE.to_string(),
                tokenizer: has_tokenizer.then(|| TOKENIZER_FILE.to_string()),
            },
        };
        let manifest_path = manifest.write(&options.out_dir)?;

        Ok(ExportReport {
            manifest,
            graph_path,
            manifest_path,
            degraded: !has_tokenizer,
        })
    }
}
