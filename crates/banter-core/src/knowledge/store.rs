//! In-memory trigger/response table and banned-term list, with their loaders.
//!
//! Source formats:
//! - knowledge base: one `trigger|response` entry per line; the first `|`
//!   splits key and value; lines without `|` or with an empty trigger after
//!   trimming are skipped; later duplicate triggers overwrite earlier ones.
//! - banned words: one lower-case term per line; blank lines are skipped.
//!
//! Per the load contract, a source that cannot be read yields an EMPTY table
//! (logged as a warning), never an error: a responder with no knowledge still
//! answers with the fallback string instead of crashing.

use std::collections::HashMap;
use std::path::Path;

/// Mapping from normalized trigger phrase to canned response.
///
/// Keys are lower-cased and trimmed on insertion. First-insertion order of
/// keys is preserved so that equal-length ties during longest-key matching
/// stay deterministic; overwriting a trigger keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: HashMap<String, String>,
    keys: Vec<String>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a trigger/response pair. The trigger is trimmed and
    /// lower-cased; empty triggers are rejected. A duplicate trigger
    /// overwrites the stored response in place.
    pub fn insert(&mut self, trigger: &str, response: impl Into<String>) {
        let key = trigger.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        if self.entries.insert(key.clone(), response.into()).is_none() {
            self.keys.push(key);
        }
    }

    /// Returns the response for an exact (already normalized) trigger.
    pub fn get(&self, trigger: &str) -> Option<&str> {
        self.entries.get(trigger).map(String::as_str)
    }

    /// All trigger keys in first-insertion order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Parses `trigger|response` lines. Malformed lines are skipped.
    pub fn from_lines(source: &str) -> Self {
        let mut kb = Self::new();
        for line in source.lines() {
            let Some((trigger, response)) = line.split_once('|') else {
                continue;
            };
            kb.insert(trigger, response.trim());
        }
        kb
    }

    /// Loads the table from a file. Read failure yields an empty table.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(source) => {
                let kb = Self::from_lines(&source);
                tracing::info!(
                    target: "banter::knowledge",
                    path = %path.display(),
                    entries = kb.len(),
                    "knowledge base loaded"
                );
                kb
            }
            Err(e) => {
                tracing::warn!(
                    target: "banter::knowledge",
                    path = %path.display(),
                    error = %e,
                    "knowledge base unreadable, starting with an empty table"
                );
                Self::new()
            }
        }
    }
}

/// Ordered list of lower-cased banned terms. Duplicates are harmless.
#[derive(Debug, Clone, Default)]
pub struct BannedWordSet {
    terms: Vec<String>,
}

impl BannedWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term, trimmed and lower-cased. Empty terms are dropped.
    pub fn add(&mut self, term: &str) {
        let term = term.trim().to_lowercase();
        if !term.is_empty() {
            self.terms.push(term);
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Parses one term per line, skipping blanks.
    pub fn from_lines(source: &str) -> Self {
        let mut set = Self::new();
        for line in source.lines() {
            set.add(line);
        }
        set
    }

    /// Loads the list from a file. Read failure yields an empty set.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(source) => {
                let set = Self::from_lines(&source);
                tracing::info!(
                    target: "banter::knowledge",
                    path = %path.display(),
                    terms = set.len(),
                    "banned-word list loaded"
                );
                set
            }
            Err(e) => {
                tracing::warn!(
                    target: "banter::knowledge",
                    path = %path.display(),
                    error = %e,
                    "banned-word list unreadable, starting with an empty set"
                );
                Self::new()
            }
        }
    }
}
