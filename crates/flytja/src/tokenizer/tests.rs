//! Tests for fallback tokenizer construction and artifact resolution.

use std::fs;
use std::path::Path;

use crate::tokenizer::artifacts::{
    resolve_tokenizer_artifacts, SPECIAL_TOKENS_FILE, TOKENIZER_CONFIG_FILE, TOKENIZER_FILE,
    VOCAB_FILE,
};
use crate::tokenizer::fallback::{
    build_tokenizer_from_vocab, CLS_TOKEN, SEP_TOKEN, UNK_TOKEN,
};
use crate::vocab::Vocabulary;

const SAMPLE_VOCAB: &str = "[UNK]\n[CLS]\n[SEP]\nhello\nworld\n";

fn sample_vocab() -> Vocabulary {
    Vocabulary::from_lines(SAMPLE_VOCAB.lines())
}

fn specials() -> [&'static str; 3] {
    [UNK_TOKEN, CLS_TOKEN, SEP_TOKEN]
}

// =============================================================================
// Fallback builder
// =============================================================================

#[test]
fn test_round_trip_preserves_every_index() {
    let vocab = sample_vocab();
    let tokenizer = build_tokenizer_from_vocab(&vocab, UNK_TOKEN, &specials()).unwrap();

    let built = tokenizer.get_vocab(false);
    assert_eq!(built.len(), vocab.len());
    for (token, id) in vocab.iter() {
        assert_eq!(built.get(token).copied(), Some(id), "{token}");
    }
}

#[test]
fn test_special_registration_keeps_existing_ids() {
    let vocab = sample_vocab();
    let tokenizer = build_tokenizer_from_vocab(&vocab, UNK_TOKEN, &specials()).unwrap();

    assert_eq!(tokenizer.token_to_id(UNK_TOKEN), Some(0));
    assert_eq!(tokenizer.token_to_id(CLS_TOKEN), Some(1));
    assert_eq!(tokenizer.token_to_id(SEP_TOKEN), Some(2));
}

#[test]
fn test_encoding_is_case_sensitive() {
    let vocab = sample_vocab();
    let tokenizer = build_tokenizer_from_vocab(&vocab, UNK_TOKEN, &specials()).unwrap();

    let ids = tokenizer.encode("hello world", false).unwrap();
    assert_eq!(ids.get_ids(), [3, 4]);

    // No lowercasing: a capitalized form is out of vocabulary.
    let ids = tokenizer.encode("Hello", false).unwrap();
    assert_eq!(ids.get_ids(), [0]);
}

#[test]
fn test_unknown_token_must_be_in_vocabulary() {
    let vocab = Vocabulary::from_lines(["hello", "world"]);
    assert!(build_tokenizer_from_vocab(&vocab, UNK_TOKEN, &specials()).is_err());
}

#[test]
fn test_empty_vocabulary_is_rejected() {
    let vocab = Vocabulary::default();
    assert!(build_tokenizer_from_vocab(&vocab, UNK_TOKEN, &specials()).is_err());
}

// =============================================================================
// Artifact resolution
// =============================================================================

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn test_vocab_only_directory_yields_complete_bundle() {
    let out = tempfile::tempdir().unwrap();
    fs::write(out.path().join(VOCAB_FILE), SAMPLE_VOCAB).unwrap();

    let has_tokenizer = resolve_tokenizer_artifacts(out.path(), None, 256);
    assert!(has_tokenizer);

    let tokenizer: serde_json::Value =
        serde_json::from_str(&read(out.path(), TOKENIZER_FILE)).unwrap();
    let embedded = &tokenizer["model"]["vocab"];
    assert_eq!(embedded["[UNK]"], 0);
    assert_eq!(embedded["[CLS]"], 1);
    assert_eq!(embedded["[SEP]"], 2);
    assert_eq!(embedded["hello"], 3);
    assert_eq!(embedded["world"], 4);
    assert_eq!(tokenizer["model"]["unk_token"], "[UNK]");

    let config: serde_json::Value =
        serde_json::from_str(&read(out.path(), TOKENIZER_CONFIG_FILE)).unwrap();
    assert_eq!(config["model_max_length"], 256);
    assert_eq!(config["do_lower_case"], false);
    assert_eq!(config["tokenizer_class"], "BertTokenizerFast");

    let specials: serde_json::Value =
        serde_json::from_str(&read(out.path(), SPECIAL_TOKENS_FILE)).unwrap();
    assert_eq!(specials["unk_token"], "[UNK]");
    assert_eq!(specials["sep_token"], "[SEP]");
    assert_eq!(specials["pad_token"], "[PAD]");
    assert_eq!(specials["cls_token"], "[CLS]");
    assert_eq!(specials["mask_token"], "[MASK]");
}

#[test]
fn test_resolver_is_idempotent() {
    let out = tempfile::tempdir().unwrap();
    fs::write(out.path().join(VOCAB_FILE), SAMPLE_VOCAB).unwrap();

    assert!(resolve_tokenizer_artifacts(out.path(), None, 256));
    let first: Vec<(String, Vec<u8>)> = [TOKENIZER_FILE, TOKENIZER_CONFIG_FILE, SPECIAL_TOKENS_FILE]
        .iter()
        .map(|name| (name.to_string(), fs::read(out.path().join(name)).unwrap()))
        .collect();

    // Second run with a different max_len: nothing may be rewritten.
    assert!(resolve_tokenizer_artifacts(out.path(), None, 999));
    for (name, bytes) in first {
        assert_eq!(
            fs::read(out.path().join(&name)).unwrap(),
            bytes,
            "{name} was modified on the second run"
        );
    }
}

#[test]
fn test_existing_description_is_never_overwritten() {
    let out = tempfile::tempdir().unwrap();
    fs::write(out.path().join(VOCAB_FILE), SAMPLE_VOCAB).unwrap();
    fs::write(out.path().join(TOKENIZER_FILE), "{\"pre\": \"existing\"}").unwrap();

    assert!(resolve_tokenizer_artifacts(out.path(), None, 256));
    assert_eq!(read(out.path(), TOKENIZER_FILE), "{\"pre\": \"existing\"}");
}

#[test]
fn test_missing_vocab_degrades_but_writes_companions() {
    let out = tempfile::tempdir().unwrap();

    let has_tokenizer = resolve_tokenizer_artifacts(out.path(), None, 128);
    assert!(!has_tokenizer);
    assert!(!out.path().join(TOKENIZER_FILE).exists());

    let config: serde_json::Value =
        serde_json::from_str(&read(out.path(), TOKENIZER_CONFIG_FILE)).unwrap();
    assert_eq!(config["model_max_length"], 128);
    assert!(out.path().join(SPECIAL_TOKENS_FILE).exists());
}

#[test]
fn test_rebuilt_description_loads_as_a_tokenizer() {
    let out = tempfile::tempdir().unwrap();
    fs::write(out.path().join(VOCAB_FILE), SAMPLE_VOCAB).unwrap();
    resolve_tokenizer_artifacts(out.path(), None, 256);

    let tokenizer = tokenizers::Tokenizer::from_file(out.path().join(TOKENIZER_FILE)).unwrap();
    let ids = tokenizer.encode("hello world", false).unwrap();
    assert_eq!(ids.get_ids(), [3, 4]);
}
