//! Top-K vocabulary by raw token frequency.
//!
//! Frequencies count every occurrence in every comment (not per-comment
//! presence). Ranking is by descending count; equal counts keep the order in
//! which the tokens were first seen while scanning the split. That order is
//! recorded explicitly rather than inherited from map iteration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Comment;
use crate::text::normalize_and_split;

/// Default vocabulary size.
pub const DEFAULT_TOP_K: usize = 160;

/// A vocabulary token and its frequency over the split it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub token: String,
    pub count: usize,
}

/// Ordered vocabulary (most frequent first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
}

impl Vocabulary {
    pub fn from_entries(entries: Vec<VocabEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `k` most frequent entries (all of them if `k >= len`).
    pub fn truncated(&self, k: usize) -> Self {
        Self {
            entries: self.entries.iter().take(k).cloned().collect(),
        }
    }
}

/// Count token occurrences over `comments` and keep the `top_k` most frequent.
///
/// Fewer than `top_k` distinct tokens yields all of them, unpadded.
pub fn build_vocabulary(comments: &[Comment], top_k: usize) -> Vocabulary {
    // token -> (count, first-seen position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for comment in comments {
        for token in normalize_and_split(&comment.text) {
            let next_rank = counts.len();
            counts.entry(token).or_insert((0, next_rank)).0 += 1;
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(token, (count, first_seen))| (token, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let entries = ranked
        .into_iter()
        .take(top_k)
        .map(|(token, count, _)| VocabEntry { token, count })
        .collect();

    Vocabulary { entries }
}
