//! Tokenizer artifact construction and bundle resolution.

pub mod artifacts;
pub mod fallback;

pub use artifacts::{
    resolve_tokenizer_artifacts, SPECIAL_TOKENS_FILE, TOKENIZER_CONFIG_FILE, TOKENIZER_FILE,
    VOCAB_FILE,
};
pub use fallback::build_tokenizer_from_vocab;

#[cfg(test)]
mod tests;
