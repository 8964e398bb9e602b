//! Flytja: export encoder checkpoints to portable ONNX + tokenizer bundles.
//!
//! Flytja turns a pretrained bidirectional sentence-encoder checkpoint into
//! an artifact bundle a downstream runtime can consume without the original
//! training framework: an ONNX graph with a fixed input/output contract,
//! a self-contained `tokenizer.json` (rebuilt from `vocab.txt` when the
//! checkpoint ships none), companion descriptor files and a manifest.
//!
//! The checkpoint loader and the graph-export engine are consumed through
//! the [`traits::CheckpointLoader`] and [`traits::GraphExporter`] seams;
//! [`hub`] provides the Hugging Face hub-backed implementations.

pub mod common;
pub mod error;
pub mod export;
pub mod hub;
pub mod manifest;
pub mod pipeline;
pub mod tokenizer;
pub mod traits;
pub mod vocab;

pub use error::{ExportError, ExportResult};
pub use export::{ArchitectureFamily, DummyInputs, ExportConfig, ExportFeature, DEFAULT_OPSET};
pub use hub::{HubCheckpointLoader, HubGraphExporter};
pub use manifest::{Manifest, ManifestFiles};
pub use pipeline::{ExportOptions, ExportPipeline, ExportReport, GRAPH_FILE};
pub use traits::{
    ArchitectureMetadata, Checkpoint, CheckpointLoader, GraphExporter, GraphModel, NativeTokenizer,
};
pub use vocab::Vocabulary;
