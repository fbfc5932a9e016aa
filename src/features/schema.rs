//! Named design-matrix columns.
//!
//! Layout (0-indexed):
//!
//! | col | name                    | value                                             |
//! |-----|-------------------------|---------------------------------------------------|
//! | 0   | `is_root`               | 0/1                                               |
//! | 1   | `controversiality`      | as given                                          |
//! | 2   | `children`              | reply count                                       |
//! | 3   | `bias`                  | 1                                                 |
//! | 4   | `controversiality_sq`   | controversiality² + offset                        |
//! | 5   | `children_sq_scaled`    | children² / reply divisor                         |
//! | 6   | `inverse_unique_words`  | 1 / (unique words + 1)                            |
//! | 7   | `repeated_words_scaled` | (words − unique words) / repeat divisor           |
//! | 8.. | `word:<token>`          | occurrences of token / token's vocabulary count   |
//!
//! Words for columns 6 and 7 come from the punctuation-stripped split; the
//! vocabulary columns use the plain lower-cased split so they line up with how
//! the vocabulary was counted.

use serde::{Deserialize, Serialize};

use crate::domain::Comment;
use crate::error::AppError;
use crate::features::Vocabulary;
use crate::text::{StrippedTokens, strip_punctuation_and_split};

/// Tunable constants of the engineered features.
///
/// The divisors only rescale their column into a range comparable with the
/// others; they carry no meaning beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureParams {
    /// Added to controversiality² so the column is never exactly zero.
    pub controversiality_offset: f64,
    pub reply_squared_divisor: f64,
    pub repeated_word_divisor: f64,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            controversiality_offset: 0.001,
            reply_squared_divisor: 30.0,
            repeated_word_divisor: 243.0,
        }
    }
}

impl FeatureParams {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.controversiality_offset.is_finite() {
            return Err(AppError::invalid_config("Controversiality offset must be finite."));
        }
        for (name, value) in [
            ("reply", self.reply_squared_divisor),
            ("repeat", self.repeated_word_divisor),
        ] {
            if !(value.is_finite() && value != 0.0) {
                return Err(AppError::invalid_config(format!(
                    "The {name} divisor must be finite and non-zero (got {value})."
                )));
            }
        }
        Ok(())
    }
}

/// Per-comment values shared by several extractors.
#[derive(Debug, Clone)]
pub struct CommentProfile<'a> {
    pub comment: &'a Comment,
    pub stripped: StrippedTokens,
}

impl<'a> CommentProfile<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        Self {
            comment,
            stripped: strip_punctuation_and_split(&comment.text),
        }
    }
}

/// A fixed (non-vocabulary) column.
#[derive(Clone, Copy)]
pub struct MetadataColumn {
    pub name: &'static str,
    pub extract: fn(&CommentProfile<'_>, &FeatureParams) -> f64,
}

impl std::fmt::Debug for MetadataColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataColumn").field("name", &self.name).finish()
    }
}

/// Number of columns that precede the vocabulary columns.
pub const METADATA_WIDTH: usize = 8;

/// Index of the constant column.
pub const BIAS_COLUMN: usize = 3;

/// Prefix of vocabulary column names.
pub const WORD_COLUMN_PREFIX: &str = "word:";

pub const METADATA_COLUMNS: [MetadataColumn; METADATA_WIDTH] = [
    MetadataColumn {
        name: "is_root",
        extract: |p, _| p.comment.is_root_encoded(),
    },
    MetadataColumn {
        name: "controversiality",
        extract: |p, _| p.comment.controversiality,
    },
    MetadataColumn {
        name: "children",
        extract: |p, _| f64::from(p.comment.children),
    },
    MetadataColumn {
        name: "bias",
        extract: |_, _| 1.0,
    },
    MetadataColumn {
        name: "controversiality_sq",
        extract: |p, params| p.comment.controversiality.powi(2) + params.controversiality_offset,
    },
    MetadataColumn {
        name: "children_sq_scaled",
        extract: |p, params| f64::from(p.comment.children).powi(2) / params.reply_squared_divisor,
    },
    MetadataColumn {
        name: "inverse_unique_words",
        extract: |p, _| 1.0 / (p.stripped.unique_count() as f64 + 1.0),
    },
    MetadataColumn {
        name: "repeated_words_scaled",
        extract: |p, params| p.stripped.repeated_count() as f64 / params.repeated_word_divisor,
    },
];

/// Total column count for a vocabulary.
pub fn column_count(vocabulary: &Vocabulary) -> usize {
    METADATA_WIDTH + vocabulary.len()
}

/// Column names in matrix order.
pub fn column_names(vocabulary: &Vocabulary) -> Vec<String> {
    METADATA_COLUMNS
        .iter()
        .map(|c| c.name.to_string())
        .chain(
            vocabulary
                .entries()
                .iter()
                .map(|e| format!("{WORD_COLUMN_PREFIX}{}", e.token)),
        )
        .collect()
}
