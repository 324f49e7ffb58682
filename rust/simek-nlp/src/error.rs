//! Error types for the analysis pipeline.

use simek_common::LaneError;
use thiserror::Error;

use crate::tag::MAX_TAG_LEN;

/// Failures of the morphological analyzer itself.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("analyzer is unavailable: {0}")]
    Unavailable(String),

    #[error("analyzer returned malformed output: {0}")]
    Malformed(String),

    #[error("failed to load lexicon: {0}")]
    Lexicon(String),
}

#[derive(Debug, Error)]
pub enum NlpError {
    #[error(transparent)]
    Analysis(#[from] AnalyzerError),

    #[error(transparent)]
    Lane(#[from] LaneError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagPatternError {
    #[error("tag pattern '{pattern}' has {len} positions, at most {MAX_TAG_LEN} are supported")]
    TooLong { pattern: String, len: usize },
}
