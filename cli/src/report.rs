//! Console progress reporter.
//!
//! Implements the library's progress-event interface with plain stderr
//! lines: per-file percent milestones, a line when each file settles, and
//! a running aggregate after every settlement. Lines instead of a redrawn
//! bar so the output survives piping and logging.

use std::collections::HashMap;
use std::sync::Mutex;

use gradedrop::{overall_percent, ProgressEvents, UploadOutcome};

/// Print a per-file line every time progress crosses a 25% step.
const MILESTONE_STEP: u8 = 25;

/// Renders upload progress to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    // Last reported percent per file index. Progress callbacks for
    // different files interleave, hence the lock.
    last_percent: Mutex<HashMap<usize, u8>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressEvents for ConsoleReporter {
    fn file_progress(&self, index: usize, name: &str, percent: u8) {
        let mut last = self.last_percent.lock().unwrap();
        let entry = last.entry(index).or_insert(0);
        if crosses_milestone(*entry, percent) {
            *entry = percent;
            eprintln!("   ⬆️  {} ({}%)", name, percent);
        }
    }

    fn file_finished(&self, _index: usize, name: &str, outcome: &UploadOutcome) {
        if outcome.success {
            eprintln!("   ✅ {} uploaded", name);
        } else {
            eprintln!(
                "   ❌ {} (Failed: {})",
                name,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    fn batch_progress(&self, completed: usize, failed: usize, total: usize) {
        eprintln!(
            "   📊 {}% ({}/{} files)",
            overall_percent(completed, failed, total),
            completed,
            total
        );
    }
}

fn crosses_milestone(last: u8, now: u8) -> bool {
    now / MILESTONE_STEP > last / MILESTONE_STEP
}

/// Human-readable size, matching the web form's rendering.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1_048_576 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    }
}
