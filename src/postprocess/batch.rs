//! Batch post-processing over independent detection sets.
//!
//! Each set is merged independently, so sets can be spread across a rayon
//! pool without changing any result. A single merge always stays sequential
//! because its outcome depends on list order.

use crate::detection::DetectionSet;
use crate::postprocess::PostProcessor;
use crate::trace::trace_span;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

impl PostProcessor {
    /// Post-processes each set independently, preserving batch order.
    ///
    /// Runs in parallel when built with the `rayon` feature and
    /// `PostProcessConfig::parallel` is set; results match the sequential path.
    pub fn process_batch(&self, batch: Vec<DetectionSet>) -> Vec<DetectionSet> {
        let _span = trace_span!(
            "postprocess_batch",
            sets = batch.len(),
            parallel = self.cfg.parallel
        )
        .entered();

        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                return batch.into_par_iter().map(|set| self.process(set)).collect();
            }
        }

        batch.into_iter().map(|set| self.process(set)).collect()
    }
}
