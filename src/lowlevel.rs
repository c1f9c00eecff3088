//! Low-level building blocks for custom post-processing pipelines.
//!
//! These are the pure stages that `PostProcessor` composes. Use them directly
//! to reorder stages or to insert custom ones, for example a class-aware
//! split before merging.

pub use crate::candidate::filter::filter_by_confidence;
pub use crate::candidate::merge::{merge_overlapping, LabelPolicy};
pub use crate::geometry::{iou, BBox};
