//! Error types for boxmerge.

use thiserror::Error;

/// Result alias for boxmerge operations.
pub type BoxMergeResult<T> = std::result::Result<T, BoxMergeError>;

/// Errors that can occur when building detections or configuring the post-processor.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BoxMergeError {
    /// Box coordinates are not finite or the corners are inverted.
    #[error("invalid box [{x1}, {y1}, {x2}, {y2}]: expected finite x1 <= x2 and y1 <= y2")]
    InvalidBox { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Score is not finite or lies outside [0, 1].
    #[error("invalid score {score}: expected a value in [0, 1]")]
    InvalidScore { score: f32 },
    /// The parallel box/score/label columns disagree in length.
    #[error("column length mismatch: {boxes} boxes, {scores} scores, {labels} labels")]
    LengthMismatch {
        boxes: usize,
        scores: usize,
        labels: usize,
    },
    /// A configured threshold is not finite or lies outside [0, 1].
    #[error("invalid {name}: {value} (expected a value in [0, 1])")]
    InvalidThreshold { name: &'static str, value: f32 },
    /// The upstream detector failed to produce detections.
    #[error("detector failed: {0}")]
    Detector(String),
}
