//! Dataset loading and partitioning.
//!
//! The dataset is a JSON array of comment objects:
//!
//! ```json
//! [{"text": "...", "popularity_score": 1.2, "children": 0,
//!   "controversiality": 0, "is_root": false}, ...]
//! ```
//!
//! Records are validated one by one so a missing field is reported with the
//! record index. Splits are consecutive slices (train, then validation, then
//! test) handed out as owned collections; nothing is rewritten in place.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{info, warn};

use crate::data::generate_comments;
use crate::domain::{Comment, DataSource, RawComment, Split, SplitSizes};
use crate::error::AppError;

/// Train/validation/test partitions of one dataset.
#[derive(Debug, Clone, Default)]
pub struct DatasetSplits {
    pub train: Vec<Comment>,
    pub validation: Vec<Comment>,
    pub test: Vec<Comment>,
}

impl DatasetSplits {
    pub fn get(&self, split: Split) -> &[Comment] {
        match split {
            Split::Train => &self.train,
            Split::Validation => &self.validation,
            Split::Test => &self.test,
        }
    }
}

/// Load comments from a JSON file.
pub fn load_comments(path: &Path) -> Result<Vec<Comment>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open dataset '{}': {e}", path.display())))?;
    let comments = read_comments(BufReader::new(file))?;
    info!("Loaded {} comments from {}", comments.len(), path.display());
    Ok(comments)
}

/// Parse and validate a JSON array of comments.
pub fn read_comments<R: Read>(reader: R) -> Result<Vec<Comment>, AppError> {
    let raw: Vec<RawComment> = serde_json::from_reader(reader)
        .map_err(|e| AppError::malformed_input(format!("Invalid dataset JSON: {e}")))?;

    raw.into_iter()
        .enumerate()
        .map(|(idx, r)| Comment::try_from_raw(idx, r))
        .collect()
}

/// Load comments from either a file or the synthetic generator.
pub fn load_source(source: &DataSource) -> Result<Vec<Comment>, AppError> {
    match source {
        DataSource::Json(path) => load_comments(path),
        DataSource::Synthetic { count, seed } => {
            info!("Generating {count} synthetic comments (seed {seed})");
            generate_comments(*count, *seed)
        }
    }
}

/// Cut `comments` into consecutive train/validation/test slices.
///
/// A dataset shorter than the requested sizes yields truncated (possibly
/// empty) trailing splits.
pub fn partition(comments: Vec<Comment>, sizes: SplitSizes) -> DatasetSplits {
    let available = comments.len();
    let requested = sizes.train.saturating_add(sizes.validation).saturating_add(sizes.test);
    if available < requested {
        warn!("Dataset has {available} comments but the splits request {requested}; trailing splits are truncated");
    }

    let mut records = comments.into_iter();
    let train: Vec<Comment> = records.by_ref().take(sizes.train).collect();
    let validation: Vec<Comment> = records.by_ref().take(sizes.validation).collect();
    let test: Vec<Comment> = records.by_ref().take(sizes.test).collect();

    DatasetSplits {
        train,
        validation,
        test,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn comment(i: usize) -> Comment {
        Comment {
            text: format!("comment {i}"),
            popularity_score: i as f64,
            children: 0,
            controversiality: 0.0,
            is_root: i % 2 == 0,
        }
    }

    #[test]
    fn reads_well_formed_records() {
        let json = r#"[
            {"text": "First!", "popularity_score": 1.5, "children": 2, "controversiality": 0, "is_root": true},
            {"text": "", "popularity_score": -0.25, "children": 0, "controversiality": 1, "is_root": false}
        ]"#;
        let comments = read_comments(json.as_bytes()).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].children, 2);
        assert!(comments[0].is_root);
        assert_eq!(comments[1].controversiality, 1.0);
    }

    #[test]
    fn missing_field_names_the_record() {
        let json = r#"[
            {"text": "ok", "popularity_score": 1.0, "children": 0, "controversiality": 0, "is_root": true},
            {"text": "no score", "children": 0, "controversiality": 0, "is_root": true}
        ]"#;
        let err = read_comments(json.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("Record 1"));
        assert!(err.to_string().contains("popularity_score"));
    }

    #[test]
    fn invalid_json_is_malformed_input() {
        let err = read_comments("{not json".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_comments(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn partition_is_consecutive_and_disjoint() {
        let comments: Vec<Comment> = (0..10).map(comment).collect();
        let sizes = SplitSizes {
            train: 6,
            validation: 2,
            test: 2,
        };
        let splits = partition(comments, sizes);
        assert_eq!(splits.train.len(), 6);
        assert_eq!(splits.get(Split::Validation)[0].popularity_score, 6.0);
        assert_eq!(splits.get(Split::Test)[1].popularity_score, 9.0);
    }

    #[test]
    fn short_dataset_truncates_trailing_splits() {
        let comments: Vec<Comment> = (0..7).map(comment).collect();
        let splits = partition(comments, SplitSizes { train: 5, validation: 5, test: 5 });
        assert_eq!(splits.train.len(), 5);
        assert_eq!(splits.validation.len(), 2);
        assert!(splits.test.is_empty());
    }

    #[test]
    fn huge_split_sizes_do_not_overflow() {
        let comments: Vec<Comment> = (0..4).map(comment).collect();
        let splits = partition(comments, SplitSizes { train: usize::MAX, validation: usize::MAX, test: 1 });
        assert_eq!(splits.train.len(), 4);
        assert!(splits.validation.is_empty());
        assert!(splits.test.is_empty());
    }

    #[test]
    fn synthetic_source_loads() {
        let comments = load_source(&DataSource::Synthetic { count: 25, seed: 3 }).unwrap();
        assert_eq!(comments.len(), 25);
    }
}
