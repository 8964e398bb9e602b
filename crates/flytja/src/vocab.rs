//! Flat newline-delimited vocabulary files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// An ordered token -> index mapping derived from file line order.
///
/// Indices are dense and 0-based: the first surviving line gets index 0.
/// Surrounding whitespace is trimmed and empty lines are skipped without
/// consuming an index.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    tokens: Vec<String>,
    ids: HashMap<String, u32>,
}

impl Vocabulary {
    /// Read a vocabulary file. Fails if the path does not exist; callers
    /// that can degrade (the tokenizer artifact resolver) log and move on.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading vocabulary {}", path.display()))?;
        Ok(Self::from_lines(raw.lines()))
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tokens = Vec::new();
        let mut ids = HashMap::new();
        for line in lines {
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            let id = tokens.len() as u32;
            tokens.push(token.to_string());
            ids.insert(token.to_string(), id);
        }
        Self { tokens, ids }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn id_of(&self, token: &str) -> Option<u32> {
        self.ids.get(token).copied()
    }

    /// Iterate entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense_and_ordered() {
        let vocab = Vocabulary::from_lines(["[UNK]", "[CLS]", "[SEP]", "hello", "world"]);

        assert_eq!(vocab.len(), 5);
        let collected: Vec<(&str, u32)> = vocab.iter().collect();
        assert_eq!(
            collected,
            vec![
                ("[UNK]", 0),
                ("[CLS]", 1),
                ("[SEP]", 2),
                ("hello", 3),
                ("world", 4)
            ]
        );
    }

    #[test]
    fn test_empty_lines_do_not_consume_indices() {
        let vocab = Vocabulary::from_lines(["a", "", "  ", "b", "", "c"]);

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.id_of("a"), Some(0));
        assert_eq!(vocab.id_of("b"), Some(1));
        assert_eq!(vocab.id_of("c"), Some(2));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let vocab = Vocabulary::from_lines(["  ##ing\t", " token "]);

        assert_eq!(vocab.id_of("##ing"), Some(0));
        assert_eq!(vocab.id_of("token"), Some(1));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Vocabulary::from_file(&dir.path().join("vocab.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_matches_from_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        std::fs::write(&path, "[UNK]\n[CLS]\n\nhello\n").unwrap();

        let vocab = Vocabulary::from_file(&path).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.id_of("hello"), Some(2));
    }
}
