//! boxmerge post-processes object-detector output.
//!
//! Raw detections are filtered by confidence, then overlapping boxes are
//! merged greedily and transitively into representative boxes. Batches of
//! independent detection sets can optionally be processed in parallel via the
//! `rayon` feature.

mod candidate;
pub mod detection;
pub mod geometry;
pub mod lowlevel;
pub mod postprocess;
mod trace;
pub mod util;

pub use candidate::filter::filter_by_confidence;
pub use candidate::merge::{merge_overlapping, LabelPolicy};
pub use detection::{Detection, DetectionSet, DetectionSummary};
pub use geometry::{iou, BBox};
pub use postprocess::{
    Detector, PostProcessConfig, PostProcessor, DEFAULT_CONFIDENCE_THRESHOLD,
    DEFAULT_IOU_THRESHOLD,
};
pub use util::{BoxMergeError, BoxMergeResult};
