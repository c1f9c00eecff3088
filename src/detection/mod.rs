//! Detections produced by an upstream object detector.
//!
//! A `DetectionSet` keeps the detector's emission order, which is usually
//! descending score. Detectors and request layers commonly hand over three
//! index-aligned columns (boxes, scores, labels); `from_columns` and
//! `to_columns` convert between that layout and validated detections.

use crate::geometry::BBox;
use crate::util::math::is_unit_interval;
use crate::util::{BoxMergeError, BoxMergeResult};

mod summary;

pub use summary::DetectionSummary;

/// A single scored, labelled box.
///
/// Fields are only reachable through accessors, so every detection outside
/// this crate went through `Detection::new` and carries a score in `[0, 1]`.
///
/// ```compile_fail
/// use boxmerge::{BBox, Detection};
///
/// let bbox = BBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
/// let det = Detection { bbox, score: 7.5, label: 1 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub(crate) bbox: BBox,
    pub(crate) score: f32,
    pub(crate) label: u32,
}

impl Detection {
    /// Creates a detection, rejecting scores outside `[0, 1]`.
    pub fn new(bbox: BBox, score: f32, label: u32) -> BoxMergeResult<Self> {
        if !is_unit_interval(score) {
            return Err(BoxMergeError::InvalidScore { score });
        }
        Ok(Self { bbox, score, label })
    }

    /// Returns the box in absolute pixel coordinates.
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// Returns the confidence score in `[0, 1]`.
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Returns the integer class id.
    pub fn label(&self) -> u32 {
        self.label
    }
}

/// Ordered detections for one image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionSet {
    detections: Vec<Detection>,
}

impl DetectionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from index-aligned box, score, and label columns.
    pub fn from_columns(
        boxes: &[[f32; 4]],
        scores: &[f32],
        labels: &[u32],
    ) -> BoxMergeResult<Self> {
        if boxes.len() != scores.len() || boxes.len() != labels.len() {
            return Err(BoxMergeError::LengthMismatch {
                boxes: boxes.len(),
                scores: scores.len(),
                labels: labels.len(),
            });
        }

        let detections = boxes
            .iter()
            .zip(scores)
            .zip(labels)
            .map(|((coords, &score), &label)| {
                Detection::new(BBox::from_array(*coords)?, score, label)
            })
            .collect::<BoxMergeResult<Vec<_>>>()?;
        Ok(Self { detections })
    }

    /// Splits the set back into index-aligned box, score, and label columns.
    pub fn to_columns(&self) -> (Vec<[f32; 4]>, Vec<f32>, Vec<u32>) {
        let mut boxes = Vec::with_capacity(self.len());
        let mut scores = Vec::with_capacity(self.len());
        let mut labels = Vec::with_capacity(self.len());
        for det in &self.detections {
            boxes.push(det.bbox.to_array());
            scores.push(det.score);
            labels.push(det.label);
        }
        (boxes, scores, labels)
    }

    /// Returns the number of detections.
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    /// Returns true when the set holds no detections.
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Returns an iterator over detections in detector order.
    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.detections.iter()
    }

    /// Returns the detections as a slice.
    pub fn as_slice(&self) -> &[Detection] {
        &self.detections
    }

    /// Consumes the set and returns the underlying detections.
    pub fn into_vec(self) -> Vec<Detection> {
        self.detections
    }

    /// Count and score statistics of the set.
    pub fn summary(&self) -> DetectionSummary {
        DetectionSummary::from_detections(&self.detections)
    }
}

impl From<Vec<Detection>> for DetectionSet {
    fn from(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}

impl FromIterator<Detection> for DetectionSet {
    fn from_iter<I: IntoIterator<Item = Detection>>(iter: I) -> Self {
        Self {
            detections: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DetectionSet {
    type Item = Detection;
    type IntoIter = std::vec::IntoIter<Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.into_iter()
    }
}

impl<'a> IntoIterator for &'a DetectionSet {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.iter()
    }
}
