//! Score statistics over a set of detections.

use crate::detection::Detection;

/// Count and confidence statistics for a detection set.
///
/// An empty set reports a count of zero and zero for every score field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DetectionSummary {
    pub count: usize,
    pub mean_score: f32,
    pub max_score: f32,
    pub min_score: f32,
}

impl DetectionSummary {
    pub(crate) fn from_detections(detections: &[Detection]) -> Self {
        if detections.is_empty() {
            return Self::default();
        }

        let mut sum = 0.0f64;
        let mut max_score = f32::MIN;
        let mut min_score = f32::MAX;
        for det in detections {
            sum += f64::from(det.score);
            max_score = max_score.max(det.score);
            min_score = min_score.min(det.score);
        }

        Self {
            count: detections.len(),
            mean_score: (sum / detections.len() as f64) as f32,
            max_score,
            min_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::detection::DetectionSet;

    #[test]
    fn empty_set_summarizes_to_zeros() {
        let summary = DetectionSet::new().summary();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean_score, 0.0);
        assert_eq!(summary.max_score, 0.0);
        assert_eq!(summary.min_score, 0.0);
    }

    #[test]
    fn summary_reports_score_extremes() {
        let set = DetectionSet::from_columns(
            &[[0.0, 0.0, 1.0, 1.0], [2.0, 2.0, 3.0, 3.0], [4.0, 4.0, 5.0, 5.0]],
            &[0.9, 0.6, 0.75],
            &[1, 1, 1],
        )
        .unwrap();
        let summary = set.summary();
        assert_eq!(summary.count, 3);
        assert!((summary.mean_score - 0.75).abs() < 1e-6);
        assert_eq!(summary.max_score, 0.9);
        assert_eq!(summary.min_score, 0.6);
    }
}
