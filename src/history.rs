//! In-session step-back history for the tracer's pause prompt.
//!
//! Distinct from the trace file itself: this is a bounded, in-memory ring
//! that lets a paused session glance backward without re-reading the file
//! it's currently writing.

/// Maximum number of entries retained. Beyond this, further events are
/// still written to the trace file by the caller, but no longer recorded
/// here -- a write-only overflow policy, not a sliding window.
pub const HISTORY_CAPACITY: usize = 1_000;

const SNAPSHOT_MAX_CHARS: usize = 4_000;
const VALUE_MAX_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct StepHistoryEntry {
    pub exec_order: u64,
    pub filename: String,
    pub line_number: u32,
    pub code: String,
    pub variables_snapshot: String,
}

/// A bounded FIFO of recent events plus a cursor for step-back display.
#[derive(Debug, Default)]
pub struct StepHistory {
    entries: Vec<StepHistoryEntry>,
    cursor: usize,
}

impl StepHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Appends a new entry and resets the step-back cursor to it. No-op
    /// once [`HISTORY_CAPACITY`] entries have already been recorded.
    pub fn push(&mut self, exec_order: u64, filename: &str, line_number: u32, code: &str, variables: &str) {
        if self.entries.len() >= HISTORY_CAPACITY {
            return;
        }
        self.entries.push(StepHistoryEntry {
            exec_order,
            filename: filename.to_string(),
            line_number,
            code: code.to_string(),
            variables_snapshot: truncate_snapshot(variables),
        });
        self.cursor = self.entries.len() - 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves the cursor back one entry and returns it, or `None` if already
    /// at the oldest retained entry (or history is empty).
    pub fn step_back(&mut self) -> Option<&StepHistoryEntry> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Up to the last `max` entries, plus the cursor's position within the
    /// returned slice (for marking "current" in a listing).
    pub fn recent(&self, max: usize) -> (&[StepHistoryEntry], usize) {
        let start = self.entries.len().saturating_sub(max);
        (&self.entries[start..], self.cursor.saturating_sub(start))
    }
}

/// Truncates each `name=repr` fragment to `VALUE_MAX_CHARS`, then the whole
/// joined snapshot to `SNAPSHOT_MAX_CHARS`, so a single pathological value
/// can't blow up history memory use.
fn truncate_snapshot(variables: &str) -> String {
    let truncated_pairs: Vec<String> = variables
        .split(';')
        .map(|pair| truncate_chars(pair, VALUE_MAX_CHARS))
        .collect();
    truncate_chars(&truncated_pairs.join(";"), SNAPSHOT_MAX_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
