//! Tokenizer artifact bundle resolution.
//!
//! The bundle is complete when `tokenizer.json`, `tokenizer_config.json`
//! and `special_tokens_map.json` all exist in the output directory. Every
//! write is gated by an existence check, so re-running the resolver on a
//! populated directory only fills gaps and never overwrites.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use crate::tokenizer::fallback::{
    build_tokenizer_from_vocab, CLS_TOKEN, MASK_TOKEN, PAD_TOKEN, SEP_TOKEN, UNK_TOKEN,
};
use crate::traits::NativeTokenizer;
use crate::vocab::Vocabulary;

pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";
pub const SPECIAL_TOKENS_FILE: &str = "special_tokens_map.json";
pub const VOCAB_FILE: &str = "vocab.txt";

#[derive(Serialize)]
struct TokenizerConfig {
    tokenizer_class: &'static str,
    do_lower_case: bool,
    model_max_length: usize,
}

#[derive(Serialize)]
struct SpecialTokensMap {
    unk_token: &'static str,
    sep_token: &'static str,
    pad_token: &'static str,
    cls_token: &'static str,
    mask_token: &'static str,
}

/// Ensure the tokenizer artifact bundle exists in `out_dir`.
///
/// Failures in here degrade the bundle instead of aborting the export:
/// each one is logged and the corresponding artifact is left absent.
/// Returns whether `tokenizer.json` exists afterwards.
pub fn resolve_tokenizer_artifacts(
    out_dir: &Path,
    native: Option<&NativeTokenizer>,
    max_len: usize,
) -> bool {
    if let Some(native) = native {
        if let Err(e) = native.save_files(out_dir) {
            warn!("Failed to save native tokenizer files: {e:#}");
        }
    }

    let tokenizer_path = out_dir.join(TOKENIZER_FILE);
    if !tokenizer_path.exists() {
        if let Err(e) = build_fallback_description(out_dir, &tokenizer_path) {
            warn!("Failed to build {TOKENIZER_FILE}: {e:#}");
        }
    }

    if let Err(e) = ensure_companions(out_dir, max_len) {
        warn!("Failed to write tokenizer companion files: {e:#}");
    }

    tokenizer_path.exists()
}

fn build_fallback_description(out_dir: &Path, tokenizer_path: &Path) -> Result<()> {
    let vocab_path = out_dir.join(VOCAB_FILE);
    if !vocab_path.exists() {
        info!("No {TOKENIZER_FILE} and no {VOCAB_FILE}; cannot rebuild a tokenizer description");
        return Ok(());
    }

    info!("{TOKENIZER_FILE} not found; rebuilding from {VOCAB_FILE}");
    let vocab = Vocabulary::from_file(&vocab_path)?;
    let tokenizer =
        build_tokenizer_from_vocab(&vocab, UNK_TOKEN, &[UNK_TOKEN, CLS_TOKEN, SEP_TOKEN])?;

    // Serialize fully in memory first so a failure cannot leave a
    // partially written description behind.
    let payload = serde_json::to_string_pretty(&tokenizer)?;
    fs::write(tokenizer_path, payload)
        .with_context(|| format!("writing {}", tokenizer_path.display()))?;
    info!("Wrote {}", tokenizer_path.display());
    Ok(())
}

fn ensure_companions(out_dir: &Path, max_len: usize) -> Result<()> {
    let config_path = out_dir.join(TOKENIZER_CONFIG_FILE);
    if !config_path.exists() {
        let payload = TokenizerConfig {
            tokenizer_class: "BertTokenizerFast",
            do_lower_case: false,
            model_max_length: max_len,
        };
        fs::write(&config_path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("writing {}", config_path.display()))?;
        info!("Wrote {}", config_path.display());
    }

    let specials_path = out_dir.join(SPECIAL_TOKENS_FILE);
    if !specials_path.exists() {
        let payload = SpecialTokensMap {
            unk_token: UNK_TOKEN,
            sep_token: SEP_TOKEN,
            pad_token: PAD_TOKEN,
            cls_token: CLS_TOKEN,
            mask_token: MASK_TOKEN,
        };
        fs::write(&specials_path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("writing {}", specials_path.display()))?;
        info!("Wrote {}", specials_path.display());
    }

    Ok(())
}
