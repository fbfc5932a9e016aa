//! Shared domain types.
//!
//! Input records go through two stages:
//!
//! - `RawComment` mirrors the JSON object and tolerates missing fields so we can
//!   report *which* field is absent instead of a bare serde error
//! - `Comment` is the validated, immutable record the feature pipeline consumes
//!
//! Configuration structs are plain data; the CLI layer fills them in.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::features::FeatureParams;
use crate::math::GradientDescentParams;

/// A comment record exactly as it appears in the dataset JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComment {
    pub text: Option<String>,
    pub popularity_score: Option<f64>,
    pub children: Option<u32>,
    pub controversiality: Option<f64>,
    pub is_root: Option<bool>,
}

/// A validated comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    /// Regression target.
    pub popularity_score: f64,
    /// Number of direct replies.
    pub children: u32,
    pub controversiality: f64,
    /// `true` when the comment replies directly to the post.
    pub is_root: bool,
}

impl Comment {
    /// Validate a raw record. `index` is the record position, used in messages.
    pub fn try_from_raw(index: usize, raw: RawComment) -> Result<Self, AppError> {
        let missing =
            |field: &str| AppError::malformed_input(format!("Record {index} is missing required field '{field}'."));

        let text = raw.text.ok_or_else(|| missing("text"))?;
        let popularity_score = raw.popularity_score.ok_or_else(|| missing("popularity_score"))?;
        let children = raw.children.ok_or_else(|| missing("children"))?;
        let controversiality = raw.controversiality.ok_or_else(|| missing("controversiality"))?;
        let is_root = raw.is_root.ok_or_else(|| missing("is_root"))?;

        let comment = Self {
            text,
            popularity_score,
            children,
            controversiality,
            is_root,
        };
        comment.check_finite(index)?;
        Ok(comment)
    }

    /// Reject NaN/inf numeric fields.
    pub fn check_finite(&self, index: usize) -> Result<(), AppError> {
        if !self.popularity_score.is_finite() {
            return Err(AppError::malformed_input(format!(
                "Record {index} has a non-finite popularity_score."
            )));
        }
        if !self.controversiality.is_finite() {
            return Err(AppError::malformed_input(format!(
                "Record {index} has a non-finite controversiality."
            )));
        }
        Ok(())
    }

    /// `is_root` encoded as 0/1.
    pub fn is_root_encoded(&self) -> f64 {
        if self.is_root { 1.0 } else { 0.0 }
    }
}

/// Which partition of the dataset to operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub fn display_name(self) -> &'static str {
        match self {
            Split::Train => "Training set",
            Split::Validation => "Validation set",
            Split::Test => "Test set",
        }
    }
}

/// Number of consecutive records assigned to each split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    pub train: usize,
    pub validation: usize,
    pub test: usize,
}

impl Default for SplitSizes {
    fn default() -> Self {
        Self {
            train: 10_000,
            validation: 1_000,
            test: 1_000,
        }
    }
}

/// Weight-solving algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    ClosedForm,
    GradientDescent,
}

impl SolverKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SolverKind::ClosedForm => "Least Squares",
            SolverKind::GradientDescent => "Gradient Descent",
        }
    }
}

/// Which solvers a `fit` run should execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SolverChoice {
    Both,
    ClosedForm,
    GradientDescent,
}

impl SolverChoice {
    pub fn kinds(self) -> Vec<SolverKind> {
        match self {
            SolverChoice::Both => vec![SolverKind::ClosedForm, SolverKind::GradientDescent],
            SolverChoice::ClosedForm => vec![SolverKind::ClosedForm],
            SolverChoice::GradientDescent => vec![SolverKind::GradientDescent],
        }
    }
}

/// Where comments come from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// A JSON array of comment objects.
    Json(PathBuf),
    /// Seeded synthetic comments.
    Synthetic { count: usize, seed: u64 },
}

/// Configuration for `creg fit`.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub source: DataSource,
    pub sizes: SplitSizes,
    pub split: Split,
    pub top_k: usize,
    pub features: FeatureParams,
    pub gradient: GradientDescentParams,
    pub solvers: SolverChoice,
    /// Largest-magnitude weights to print per solver.
    pub top_n: usize,
    pub histogram: bool,
    pub export_model: Option<PathBuf>,
}

/// Configuration for `creg sweep`.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub source: DataSource,
    pub sizes: SplitSizes,
    pub eval_split: Split,
    pub max_k: usize,
    pub features: FeatureParams,
    pub export: Option<PathBuf>,
}

/// Configuration for `creg eval`.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub source: DataSource,
    pub sizes: SplitSizes,
    pub split: Split,
    pub model_path: PathBuf,
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn full_raw() -> RawComment {
        RawComment {
            text: Some("hello world".to_string()),
            popularity_score: Some(1.25),
            children: Some(2),
            controversiality: Some(0.0),
            is_root: Some(true),
        }
    }

    #[test]
    fn complete_record_validates() {
        let c = Comment::try_from_raw(0, full_raw()).unwrap();
        assert_eq!(c.children, 2);
        assert_eq!(c.is_root_encoded(), 1.0);
    }

    #[test]
    fn missing_field_is_malformed_input() {
        let raw = RawComment {
            children: None,
            ..full_raw()
        };
        let err = Comment::try_from_raw(7, raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("children"));
        assert!(err.to_string().contains("7"));
    }

    #[test]
    fn non_finite_target_is_rejected() {
        let raw = RawComment {
            popularity_score: Some(f64::NAN),
            ..full_raw()
        };
        assert!(Comment::try_from_raw(0, raw).is_err());
    }

    #[test]
    fn solver_choice_expands_in_order() {
        assert_eq!(
            SolverChoice::Both.kinds(),
            vec![SolverKind::ClosedForm, SolverKind::GradientDescent]
        );
    }
}
