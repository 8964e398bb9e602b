//! Dummy input tensors for graph tracing.

use ndarray::Array2;

/// Default tracing batch size.
pub const DUMMY_BATCH: usize = 2;

/// Default tracing sequence length.
pub const DUMMY_SEQ_LEN: usize = 8;

/// Representative input tensors matching an export configuration's
/// declared schema. Values are placeholders; only names and shapes matter
/// to the export engine.
#[derive(Debug, Clone)]
pub struct DummyInputs {
    pub input_ids: Array2<i64>,
    pub attention_mask: Array2<i64>,
    pub token_type_ids: Option<Array2<i64>>,
}

impl DummyInputs {
    pub fn batch_size(&self) -> usize {
        self.input_ids.nrows()
    }

    pub fn seq_len(&self) -> usize {
        self.input_ids.ncols()
    }

    /// Input names in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = vec!["input_ids", "attention_mask"];
        if self.token_type_ids.is_some() {
            names.push("token_type_ids");
        }
        names
    }
}
