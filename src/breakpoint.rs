//! The tracer's live breakpoint table.
//!
//! Distinct from the navigator's post-mortem breakpoints (`navigator::mod`):
//! the tracer matches on exact `(filename, line_number)` equality only, with
//! no basename fallback, since the host always reports its own canonical
//! path back to us.

/// A single live breakpoint.
#[derive(Debug, Clone)]
pub struct Breakpoint {
    pub filename: String,
    pub line_number: u32,
    pub enabled: bool,
    pub hit_count: u64,
}

/// The tracer session's set of live breakpoints.
///
/// A small `Vec` rather than a keyed map: sessions carry at most a handful
/// of breakpoints, and duplicates are permitted (harmless, if wasteful).
#[derive(Debug, Default)]
pub struct BreakpointTable {
    entries: Vec<Breakpoint>,
}

impl BreakpointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new, enabled breakpoint at `(filename, line_number)`.
    /// Duplicates are not filtered out.
    pub fn set(&mut self, filename: &str, line_number: u32) {
        self.entries.insert(
            0,
            Breakpoint {
                filename: filename.to_string(),
                line_number,
                enabled: true,
                hit_count: 0,
            },
        );
    }

    /// Removes every breakpoint.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks `(filename, line_number)` against the table. On an exact match
    /// against an enabled entry, increments its hit count and returns it.
    pub fn check_hit(&mut self, filename: &str, line_number: u32) -> Option<&Breakpoint> {
        let idx = self
            .entries
            .iter()
            .position(|bp| bp.enabled && bp.line_number == line_number && bp.filename == filename)?;
        self.entries[idx].hit_count += 1;
        Some(&self.entries[idx])
    }
}
