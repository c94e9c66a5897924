//! Progress event interface.
//!
//! The uploader reports progress through this trait instead of owning any
//! rendering; the CLI plugs in a console reporter, tests plug in
//! collectors, and library users can ignore it with [`NullProgress`].
//!
//! Callbacks for different files interleave in no particular order. All
//! percentages are rounded to whole numbers in 0..=100.

use crate::types::UploadOutcome;

/// Consumer of upload progress.
///
/// Default implementations are no-ops so implementors only override what
/// they render.
pub trait ProgressEvents: Send + Sync {
    /// Fractional progress of one file, fired whenever the rounded
    /// percent changes. `index` is the file's position in the batch.
    fn file_progress(&self, _index: usize, _name: &str, _percent: u8) {}

    /// One file settled, successfully or not.
    fn file_finished(&self, _index: usize, _name: &str, _outcome: &UploadOutcome) {}

    /// Aggregate counters after a file settled: settled = completed + failed.
    fn batch_progress(&self, _completed: usize, _failed: usize, _total: usize) {}
}

/// Ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressEvents for NullProgress {}

/// Overall percent for the aggregate indicator: settled files over total.
pub fn overall_percent(completed: usize, failed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (((completed + failed) as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_percent_counts_failures_as_settled() {
        assert_eq!(overall_percent(0, 0, 3), 0);
        assert_eq!(overall_percent(1, 1, 3), 67);
        assert_eq!(overall_percent(2, 1, 3), 100);
        assert_eq!(overall_percent(0, 0, 0), 100);
    }

    #[test]
    fn test_null_progress_is_callable() {
        let progress = NullProgress;
        progress.file_progress(0, "a.pdf", 50);
        progress.batch_progress(1, 0, 2);
    }
}
