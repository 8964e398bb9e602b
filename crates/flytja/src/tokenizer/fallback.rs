//! Fallback tokenizer reconstruction from a fixed vocabulary.
//!
//! Some checkpoints ship only a flat `vocab.txt` and no self-contained
//! `tokenizer.json`. A WordPiece tokenizer is fully determined by that
//! vocabulary, so it can be rebuilt deterministically: nothing is trained
//! and no token-to-index assignment may change.

use anyhow::{anyhow, Result};
use tokenizers::decoders::DecoderWrapper;
use tokenizers::models::bpe::Vocab;
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::PostProcessorWrapper;
use tokenizers::{AddedToken, Tokenizer, TokenizerBuilder, TokenizerImpl};

use crate::vocab::Vocabulary;

pub const UNK_TOKEN: &str = "[UNK]";
pub const CLS_TOKEN: &str = "[CLS]";
pub const SEP_TOKEN: &str = "[SEP]";
pub const PAD_TOKEN: &str = "[PAD]";
pub const MASK_TOKEN: &str = "[MASK]";

/// Build a self-contained WordPiece tokenizer from an existing vocabulary.
///
/// The unknown token must already be present in the vocabulary. The given
/// special tokens are registered for bookkeeping only; tokens already in the
/// vocabulary keep their indices. Pad and mask are intentionally not passed
/// here, they only appear in the special-token map.
pub fn build_tokenizer_from_vocab(
    vocab: &Vocabulary,
    unk_token: &str,
    special_tokens: &[&str],
) -> Result<Tokenizer> {
    if vocab.is_empty() {
        return Err(anyhow!("cannot build a tokenizer from an empty vocabulary"));
    }
    if vocab.id_of(unk_token).is_none() {
        return Err(anyhow!(
            "unknown token '{unk_token}' is not in the vocabulary"
        ));
    }

    let mut mapping = Vocab::default();
    for (token, id) in vocab.iter() {
        mapping.insert(token.to_string(), id);
    }

    let model = WordPiece::builder()
        .vocab(mapping)
        .unk_token(unk_token.to_string())
        .continuing_subword_prefix("##".to_string())
        .build()
        .map_err(|e| anyhow!("WordPiece construction failed: {e}"))?;

    // Mixed-case multilingual vocabulary: no lowercasing, no accent stripping.
    let normalizer = BertNormalizer::new(true, true, Some(false), false);

    let built: TokenizerImpl<
        WordPiece,
        BertNormalizer,
        BertPreTokenizer,
        PostProcessorWrapper,
        DecoderWrapper,
    > = TokenizerBuilder::new()
        .with_model(model)
        .with_normalizer(Some(normalizer))
        .with_pre_tokenizer(Some(BertPreTokenizer))
        .with_post_processor(None)
        .with_decoder(None)
        .build()
        .map_err(|e| anyhow!("tokenizer assembly failed: {e}"))?;

    let mut tokenizer: Tokenizer = built.into();

    let added: Vec<AddedToken> = special_tokens
        .iter()
        .map(|token| AddedToken::from(token.to_string(), true))
        .collect();
    tokenizer.add_special_tokens(&added);

    Ok(tokenizer)
}
