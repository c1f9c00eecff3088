//! Greedy iterative merging of overlapping detections.

use crate::detection::Detection;
use crate::geometry::iou;
use crate::trace::trace_merge_step;

/// Chooses which label survives when two detections are merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelPolicy {
    /// Keep the label of the detection that appears earlier in the working list.
    #[default]
    FirstSeen,
    /// Keep the label of the higher-scoring detection; ties keep the earlier one.
    HighestScore,
}

/// Counters describing one merge run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct MergeStats {
    pub(crate) passes: usize,
    pub(crate) merges: usize,
}

fn absorb(keep: Detection, other: Detection, policy: LabelPolicy) -> Detection {
    let label = match policy {
        LabelPolicy::FirstSeen => keep.label,
        LabelPolicy::HighestScore if other.score > keep.score => other.label,
        LabelPolicy::HighestScore => keep.label,
    };
    Detection {
        bbox: keep.bbox.union_box(&other.bbox),
        score: keep.score.max(other.score),
        label,
    }
}

/// Repeatedly merges pairs with IoU at or above `iou_threshold` until none remain.
///
/// Pairs `(i, j)` with `i < j` are scanned in list order. The first pair that
/// reaches the threshold is collapsed into slot `i` (union box, max score,
/// label per `policy`), `j` is removed, and the scan restarts from the front.
/// Absorption is transitive, so chains of weakly overlapping boxes collapse
/// even when their ends do not overlap each other.
///
/// The result depends on input order. Each survivor sits at the index of the
/// first detection of its cluster. Cost is O(n^2) per pass and O(n^3) overall.
pub fn merge_overlapping(
    detections: Vec<Detection>,
    iou_threshold: f32,
    policy: LabelPolicy,
) -> Vec<Detection> {
    merge_overlapping_with_stats(detections, iou_threshold, policy).0
}

pub(crate) fn merge_overlapping_with_stats(
    detections: Vec<Detection>,
    iou_threshold: f32,
    policy: LabelPolicy,
) -> (Vec<Detection>, MergeStats) {
    let mut working = detections;
    let mut stats = MergeStats::default();

    while let Some((i, j)) = find_overlapping_pair(&working, iou_threshold) {
        stats.passes += 1;
        stats.merges += 1;
        let other = working.remove(j);
        working[i] = absorb(working[i], other, policy);
        trace_merge_step!(keep = i, absorbed = j, remaining = working.len());
    }
    // Final scan that found nothing to merge.
    stats.passes += 1;

    (working, stats)
}

fn find_overlapping_pair(detections: &[Detection], iou_threshold: f32) -> Option<(usize, usize)> {
    for (i, a) in detections.iter().enumerate() {
        for (offset, b) in detections[i + 1..].iter().enumerate() {
            if iou(&a.bbox, &b.bbox) >= iou_threshold {
                return Some((i, i + 1 + offset));
            }
        }
    }
    None
}
