use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// Number of buckets in the table. Fixed; the table never resizes.
pub const BUCKET_COUNT: usize = 1000;

/// Longest word the table will accept.
pub const MAX_WORD_LEN: usize = 45;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("could not read word list: {0}")]
    Read(#[from] std::io::Error),
    #[error("word \"{0}\" is longer than {MAX_WORD_LEN} characters")]
    Oversized(String),
}

/// What `load` does with a token longer than [`MAX_WORD_LEN`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")] // Ensures case-insensitivity
pub enum Oversized {
    #[default]
    Skip,
    Reject,
}

/// Hash table of words with a fixed bucket count and per-bucket chaining.
///
/// Membership is ASCII case-insensitive. The table starts with no buckets
/// at all; `load` allocates them and `unload` drops them again.
pub struct WordTable {
    buckets: Vec<Vec<String>>,
    word_count: u32,
}

impl WordTable {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            word_count: 0,
        }
    }

    /// Loads the word list at `path`, replacing anything already in the
    /// table. On failure the table must be treated as unusable until the
    /// next successful load.
    pub fn load(&mut self, path: impl AsRef<Path>, oversized: Oversized) -> Result<(), LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.display().to_string(),
            source,
        })?;
        self.load_from(BufReader::new(file), oversized)
    }

    /// Same as [`WordTable::load`] but for any readable source of
    /// whitespace-separated tokens.
    pub fn load_from<R: BufRead>(
        &mut self,
        reader: R,
        oversized: Oversized,
    ) -> Result<(), LoadError> {
        // All buckets exist before the first token is read.
        self.buckets = vec![Vec::new(); BUCKET_COUNT];
        self.word_count = 0;

        for line in reader.lines() {
            let line = line?;
            for token in line.split_whitespace() {
                if token.len() > MAX_WORD_LEN {
                    match oversized {
                        Oversized::Skip => {
                            debug!("skipping oversized token \"{token}\"");
                            continue;
                        }
                        Oversized::Reject => return Err(LoadError::Oversized(token.to_string())),
                    }
                }
                self.buckets[hash(token)].push(token.to_string());
                self.word_count += 1;
            }
        }

        debug!("loaded {} words", self.word_count);
        Ok(())
    }

    /// Case-insensitive membership test. Before a successful load every
    /// word is reported absent.
    pub fn check(&self, word: &str) -> bool {
        if self.buckets.is_empty() {
            return false;
        }
        self.buckets[hash(word)]
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(word))
    }

    /// Number of words inserted by the last load, duplicates included.
    pub fn size(&self) -> u32 {
        self.word_count
    }

    /// Drops every entry and the buckets themselves, returning the table
    /// to its unloaded state. Releasing owned memory cannot fail.
    pub fn unload(&mut self) {
        self.buckets = Vec::new();
        self.word_count = 0;
    }
}

impl Default for WordTable {
    fn default() -> Self {
        Self::new()
    }
}

// Polynomial accumulate-and-mod hash over the lowercased bytes, base 13.
// The u32 accumulator wraps; bucket placement only has to agree between
// load and check.
fn hash(word: &str) -> usize {
    let mut sum: u32 = 0;
    let mut power: u32 = 1;
    for byte in word.bytes() {
        sum = sum.wrapping_add((byte.to_ascii_lowercase() as u32).wrapping_mul(power));
        power = power.wrapping_mul(13);
    }
    (sum % BUCKET_COUNT as u32) as usize
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    fn table_with(words: &str) -> WordTable {
        let mut table = WordTable::new();
        table.load_from(Cursor::new(words), Oversized::Skip).unwrap();
        table
    }

    #[test]
    fn check_is_case_insensitive() {
        let table = table_with("Apple");
        assert!(table.check("apple"));
        assert!(table.check("APPLE"));
        assert!(table.check("aPpLe"));
    }

    #[test]
    fn absent_words_are_absent() {
        let table = table_with("apple banana");
        assert!(!table.check("cherry"));
        assert!(!table.check(""));
    }

    #[test]
    fn check_is_idempotent() {
        let table = table_with("apple");
        assert!(table.check("apple"));
        assert!(table.check("apple"));
        assert!(!table.check("pear"));
        assert!(!table.check("pear"));
    }

    #[test]
    fn duplicates_count_twice() {
        let table = table_with("cat cat dog");
        assert_eq!(table.size(), 3);
    }

    #[test]
    fn hash_is_deterministic_and_ignores_case() {
        assert_eq!(hash("cat"), hash("cat"));
        assert_eq!(hash("cat"), hash("CAT"));
        assert!(hash("cat") < BUCKET_COUNT);
    }

    #[test]
    fn colliding_words_need_a_full_match() {
        // "nn" and "ao" land in the same bucket: 110 + 110*13 == 97 + 111*13.
        assert_eq!(hash("nn"), hash("ao"));
        let table = table_with("nn");
        assert!(table.check("nn"));
        assert!(!table.check("ao"));
    }

    #[test]
    fn check_before_load_is_false() {
        let table = WordTable::new();
        assert!(!table.check("anything"));
        assert_eq!(table.size(), 0);
    }

    #[test]
    fn empty_word_list_loads() {
        let table = table_with("");
        assert_eq!(table.size(), 0);
        assert!(!table.check("apple"));
    }

    #[test]
    fn unload_empties_the_table() {
        let mut table = table_with("apple banana");
        table.unload();
        assert_eq!(table.size(), 0);
        assert!(!table.check("apple"));
        // Unloading an already empty table is a no-op.
        table.unload();
        assert_eq!(table.size(), 0);
    }

    #[test]
    fn reload_replaces_previous_contents() {
        let mut table = table_with("apple banana");
        table
            .load_from(Cursor::new("cherry"), Oversized::Skip)
            .unwrap();
        assert_eq!(table.size(), 1);
        assert!(table.check("cherry"));
        assert!(!table.check("apple"));
    }

    #[test]
    fn oversized_token_is_skipped() {
        let long = "a".repeat(MAX_WORD_LEN + 1);
        let table = table_with(&format!("{long} cat"));
        assert_eq!(table.size(), 1);
        assert!(table.check("cat"));
        assert!(!table.check(&long));
    }

    #[test]
    fn oversized_token_rejects_the_load() {
        let long = "a".repeat(MAX_WORD_LEN + 1);
        let mut table = WordTable::new();
        let err = table
            .load_from(Cursor::new(long.as_str()), Oversized::Reject)
            .unwrap_err();
        assert!(matches!(err, LoadError::Oversized(_)));
    }

    #[test]
    fn longest_allowed_word_is_kept() {
        let word = "a".repeat(MAX_WORD_LEN);
        let table = table_with(&word);
        assert_eq!(table.size(), 1);
        assert!(table.check(&word));
    }

    #[test]
    fn loads_word_list_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "apple\nbanana\ncherry\n").unwrap();

        let mut table = WordTable::new();
        table.load(&path, Oversized::Skip).unwrap();
        assert_eq!(table.size(), 3);
        assert!(table.check("Apple"));
        assert!(!table.check("grape"));

        table.unload();
        assert_eq!(table.size(), 0);
    }

    #[test]
    fn open_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = WordTable::new();
        let err = table
            .load(dir.path().join("missing.txt"), Oversized::Skip)
            .unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
