//! Confidence thresholding.

use crate::detection::Detection;

/// Keeps detections whose score is at least `threshold`, preserving order.
///
/// The boundary is inclusive: a score equal to the threshold is retained.
pub fn filter_by_confidence(detections: Vec<Detection>, threshold: f32) -> Vec<Detection> {
    let mut kept = detections;
    kept.retain(|det| det.score >= threshold);
    kept
}
