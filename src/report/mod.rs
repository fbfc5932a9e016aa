//! Reporting utilities: word-count statistics, weight rankings, and
//! formatted terminal output.

pub mod format;

pub use format::*;

use std::collections::BTreeMap;

use crate::domain::Comment;
use crate::text::strip_punctuation_and_split;

/// A design-matrix column and its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedWeight {
    pub column: String,
    pub weight: f64,
}

/// Punctuation-stripped word count (duplicates kept) of each comment.
pub fn word_counts(comments: &[Comment]) -> Vec<usize> {
    comments
        .iter()
        .map(|c| strip_punctuation_and_split(&c.text).word_count())
        .collect()
}

/// Number of comments having each word count.
///
/// Every count from 0 to the longest comment is present, including counts no
/// comment has.
pub fn word_count_histogram(comments: &[Comment]) -> BTreeMap<usize, usize> {
    let counts = word_counts(comments);
    let Some(&longest) = counts.iter().max() else {
        return BTreeMap::new();
    };

    let mut histogram: BTreeMap<usize, usize> = (0..=longest).map(|n| (n, 0)).collect();
    for n in counts {
        *histogram.entry(n).or_insert(0) += 1;
    }
    histogram
}

/// The `top_n` columns with the largest absolute weight.
pub fn rank_weights(columns: &[String], weights: &[f64], top_n: usize) -> Vec<RankedWeight> {
    let mut ranked: Vec<RankedWeight> = columns
        .iter()
        .zip(weights.iter())
        .map(|(column, &weight)| RankedWeight {
            column: column.clone(),
            weight,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.weight
            .abs()
            .partial_cmp(&a.weight.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(text: &str) -> Comment {
        Comment {
            text: text.to_string(),
            popularity_score: 0.0,
            children: 0,
            controversiality: 0.0,
            is_root: false,
        }
    }

    #[test]
    fn histogram_fills_gaps_with_zero() {
        let comments = vec![comment("one"), comment("one two three"), comment("x y z"), comment("")];
        let histogram = word_count_histogram(&comments);
        let expected: BTreeMap<usize, usize> = [(0, 1), (1, 1), (2, 0), (3, 2)].into_iter().collect();
        assert_eq!(histogram, expected);
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(word_count_histogram(&[]).is_empty());
    }

    #[test]
    fn word_counts_ignore_stripped_punctuation() {
        assert_eq!(word_counts(&[comment("Hi . there !")]), vec![2]);
    }

    #[test]
    fn rank_weights_orders_by_magnitude() {
        let columns: Vec<String> = ["bias", "children", "word:lol"].iter().map(|s| s.to_string()).collect();
        let ranked = rank_weights(&columns, &[0.5, -2.0, 1.0], 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].column, "children");
        assert_eq!(ranked[1].column, "word:lol");
    }
}
