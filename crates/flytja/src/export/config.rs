//! Architecture-to-export-configuration resolution.

use std::fmt;
use std::str::FromStr;

use log::debug;
use ndarray::Array2;

use crate::error::ExportError;
use crate::export::inputs::DummyInputs;

/// Default ONNX opset version.
pub const DEFAULT_OPSET: u32 = 13;

/// Encoder architecture families with a known export configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchitectureFamily {
    /// BERT with absolute positional and segment embeddings.
    Bert,

    /// DistilBERT: no segment embeddings, no pooler.
    DistilBert,

    /// RoBERTa family.
    Roberta,

    /// Multilingual RoBERTa variant.
    XlmRoberta,

    /// MPNet with relative attention bias.
    Mpnet,

    /// ELECTRA discriminator.
    Electra,
}

impl ArchitectureFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bert => "bert",
            Self::DistilBert => "distilbert",
            Self::Roberta => "roberta",
            Self::XlmRoberta => "xlm-roberta",
            Self::Mpnet => "mpnet",
            Self::Electra => "electra",
        }
    }

    /// Families with segment embeddings feed `token_type_ids`.
    fn uses_token_type_ids(&self) -> bool {
        matches!(self, Self::Bert | Self::Electra)
    }
}

impl fmt::Display for ArchitectureFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ArchitectureFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bert" => Ok(Self::Bert),
            "distilbert" => Ok(Self::DistilBert),
            "roberta" => Ok(Self::Roberta),
            "xlm-roberta" => Ok(Self::XlmRoberta),
            "mpnet" => Ok(Self::Mpnet),
            "electra" => Ok(Self::Electra),
            _ => Err(format!("unknown architecture family: '{s}'")),
        }
    }
}

/// Export feature labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFeature {
    /// Hidden-state extraction, the primary label.
    Feature,

    /// Fallback label for export tables that predate `feature`.
    SequenceClassification,
}

impl ExportFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::SequenceClassification => "sequence-classification",
        }
    }
}

impl fmt::Display for ExportFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the export table carries an entry for (family, feature).
///
/// Mpnet and Electra entries were added before the `feature` label existed
/// and only resolve through their classification entry.
fn supports(family: ArchitectureFamily, feature: ExportFeature) -> bool {
    match (family, feature) {
        (ArchitectureFamily::Mpnet | ArchitectureFamily::Electra, ExportFeature::Feature) => false,
        _ => true,
    }
}

/// Resolved export configuration for one architecture family.
///
/// Constructed once per invocation from the checkpoint's architecture
/// metadata, immutable thereafter. Declares the input/output contract and
/// synthesizes dummy input tensors matching it.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    family: ArchitectureFamily,
    feature: ExportFeature,
    opset: u32,
}

impl ExportConfig {
    /// Look up the export configuration for an architecture identifier.
    ///
    /// The primary key is (family, `feature`). On a miss, the lookup is
    /// retried once with `sequence-classification` — a compatibility shim
    /// for export-table version skew, not architecture-specific behavior.
    /// When both lookups miss the error propagates: there is no sensible
    /// default input schema to synthesize dummy tensors from.
    pub fn resolve(architecture: &str, opset: u32) -> Result<Self, ExportError> {
        let family: ArchitectureFamily = architecture
            .parse()
            .map_err(|_| ExportError::NoExportConfig(architecture.to_string()))?;

        if let Some(config) = Self::lookup(family, ExportFeature::Feature, opset) {
            return Ok(config);
        }
        debug!("No '{}' entry for {family}; retrying with '{}'",
            ExportFeature::Feature,
            ExportFeature::SequenceClassification);
        Self::lookup(family, ExportFeature::SequenceClassification, opset)
            .ok_or_else(|| ExportError::NoExportConfig(architecture.to_string()))
    }

    fn lookup(family: ArchitectureFamily, feature: ExportFeature, opset: u32) -> Option<Self> {
        supports(family, feature).then_some(Self {
            family,
            feature,
            opset,
        })
    }

    pub fn family(&self) -> ArchitectureFamily {
        self.family
    }

    pub fn feature(&self) -> ExportFeature {
        self.feature
    }

    pub fn opset(&self) -> u32 {
        self.opset
    }

    /// Input names in the order the graph expects them.
    pub fn input_names(&self) -> Vec<&'static str> {
        let mut names = vec!["input_ids", "attention_mask"];
        if self.family.uses_token_type_ids() {
            names.push("token_type_ids");
        }
        names
    }

    /// Output names under the resolved feature.
    pub fn output_names(&self) -> &'static [&'static str] {
        match self.feature {
            ExportFeature::SequenceClassification => &["logits"],
            ExportFeature::Feature => match self.family {
                ArchitectureFamily::DistilBert => &["last_hidden_state"],
                _ => &["last_hidden_state", "pooler_output"],
            },
        }
    }

    /// Synthesize input tensors compatible with the declared schema.
    pub fn generate_dummy_inputs(
        &self,
        batch: usize,
        seq_len: usize,
    ) -> Result<DummyInputs, ExportError> {
        if batch == 0 || seq_len == 0 {
            return Err(ExportError::InvalidDummyInputs(format!(
                "batch and sequence length must be non-zero (got {batch}x{seq_len})"
            )));
        }

        let input_ids = Array2::<i64>::ones((batch, seq_len));
        let attention_mask = Array2::<i64>::ones((batch, seq_len));
        let token_type_ids = self
            .family
            .uses_token_type_ids()
            .then(|| Array2::<i64>::zeros((batch, seq_len)));

        Ok(DummyInputs {
            input_ids,
            attention_mask,
            token_type_ids,
        })
    }
}
