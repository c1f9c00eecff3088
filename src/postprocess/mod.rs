//! High-level post-processing of detector output.
//!
//! `PostProcessor` runs the confidence filter followed by the iterative box
//! merger. It only carries validated configuration, so a single instance can
//! be shared across threads and requests.

use crate::candidate::filter::filter_by_confidence;
use crate::candidate::merge::{merge_overlapping_with_stats, LabelPolicy};
use crate::detection::DetectionSet;
use crate::trace::{trace_event, trace_span};
use crate::util::math::is_unit_interval;
use crate::util::{BoxMergeError, BoxMergeResult};

mod batch;

/// Default minimum score for a detection to be considered.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.8;
/// Default IoU at which two boxes are merged. Low on purpose so fragmented
/// proposals of one object collapse together.
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.1;

/// Post-processing configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PostProcessConfig {
    /// Detections scoring below this are dropped before merging.
    pub confidence_threshold: f32,
    /// Pairs with IoU at or above this are merged.
    pub iou_threshold: f32,
    /// Which label survives a merge.
    pub label_policy: LabelPolicy,
    /// Process batches in parallel when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            label_policy: LabelPolicy::FirstSeen,
            parallel: false,
        }
    }
}

impl PostProcessConfig {
    /// Checks that both thresholds are finite and within `[0, 1]`.
    pub fn validate(&self) -> BoxMergeResult<()> {
        if !is_unit_interval(self.confidence_threshold) {
            return Err(BoxMergeError::InvalidThreshold {
                name: "confidence_threshold",
                value: self.confidence_threshold,
            });
        }
        if !is_unit_interval(self.iou_threshold) {
            return Err(BoxMergeError::InvalidThreshold {
                name: "iou_threshold",
                value: self.iou_threshold,
            });
        }
        Ok(())
    }
}

/// Upstream source of raw detections, such as an inference session wrapper.
pub trait Detector {
    /// What the detector consumes, typically a decoded image.
    type Input: ?Sized;

    /// Produces raw detections for one input.
    fn detect(&self, input: &Self::Input) -> BoxMergeResult<DetectionSet>;
}

/// Filters and merges detections according to a validated configuration.
#[derive(Clone, Debug, Default)]
pub struct PostProcessor {
    cfg: PostProcessConfig,
}

impl PostProcessor {
    /// Creates a post-processor after validating `cfg`.
    pub fn new(cfg: PostProcessConfig) -> BoxMergeResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PostProcessConfig {
        &self.cfg
    }

    /// Drops low-confidence detections, then merges overlapping ones.
    pub fn process(&self, detections: DetectionSet) -> DetectionSet {
        let _span = trace_span!("postprocess", input = detections.len()).entered();

        let input_len = detections.len();
        let kept = filter_by_confidence(detections.into_vec(), self.cfg.confidence_threshold);
        trace_event!(
            "confidence_filter",
            kept = kept.len(),
            dropped = input_len - kept.len()
        );

        let (merged, stats) =
            merge_overlapping_with_stats(kept, self.cfg.iou_threshold, self.cfg.label_policy);
        trace_event!(
            "merge",
            passes = stats.passes,
            merges = stats.merges,
            survivors = merged.len()
        );

        DetectionSet::from(merged)
    }

    /// Runs `detector` on `input` and post-processes its output.
    pub fn run<D: Detector>(&self, detector: &D, input: &D::Input) -> BoxMergeResult<DetectionSet> {
        let raw = detector.detect(input)?;
        Ok(self.process(raw))
    }
}
