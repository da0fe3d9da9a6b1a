//! The trace navigator's state machine: a loaded trace plus a cursor over
//! it, post-mortem breakpoints, and the operations the command REPL
//! (`navigator/commands.rs`) drives.

use crate::record::TraceEvent;

mod commands;

/// Post-mortem breakpoints are capped so a typo-heavy session can't grow
/// the table unboundedly; the original source used the same limit.
pub const MAX_BREAKPOINTS: usize = 100;

#[derive(Debug)]
pub enum NavigatorError {
    CapacityReached,
}

impl std::fmt::Display for NavigatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavigatorError::CapacityReached => write!(f, "maximum breakpoints ({MAX_BREAKPOINTS}) reached"),
        }
    }
}

impl std::error::Error for NavigatorError {}

#[derive(Debug, PartialEq, Eq)]
pub enum ContinueResult {
    Hit,
    NoneAhead,
    NoneBehind,
    NoBreakpoints,
}

/// A loaded trace, with a cursor into it and a set of post-mortem
/// breakpoints to search for with `c`/`rc`.
#[derive(Debug)]
pub struct Navigator {
    events: Vec<TraceEvent>,
    cursor: usize,
    breakpoints: Vec<(String, u32)>,
}

impl Navigator {
    /// Builds a navigator over `events`. Returns `None` for an empty trace,
    /// which the caller reports as "empty or invalid" and exits non-zero.
    pub fn new(events: Vec<TraceEvent>) -> Option<Self> {
        if events.is_empty() {
            return None;
        }
        Some(Self {
            events,
            cursor: 0,
            breakpoints: Vec::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &TraceEvent {
        &self.events[self.cursor]
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn breakpoints(&self) -> &[(String, u32)] {
        &self.breakpoints
    }

    /// Moves forward one event. Returns `false` if already at the last one.
    pub fn step_next(&mut self) -> bool {
        if self.cursor + 1 < self.events.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Moves backward one event. Returns `false` if already at the first one.
    pub fn step_back(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to the event with this 1-based execution number. `None` if out
    /// of the valid `1..=len()` range, `Some(false)` if in range but no
    /// event carries that `exec_order` (a gap from a skipped/filtered line).
    pub fn jump_to_exec(&mut self, exec_number: i64) -> Option<bool> {
        if exec_number < 1 || exec_number as usize > self.events.len() {
            return None;
        }
        let target = (exec_number - 1) as u64;
        match self.events.iter().position(|e| e.exec_order == target) {
            Some(pos) => {
                self.cursor = pos;
                Some(true)
            }
            None => Some(false),
        }
    }

    /// Jumps to the first event at `line_number`, searching from the start
    /// of the trace. Returns `false` if no event matches.
    pub fn jump_to_line(&mut self, line_number: u32) -> bool {
        match self.events.iter().position(|e| e.line_number == line_number) {
            Some(pos) => {
                self.cursor = pos;
                true
            }
            None => false,
        }
    }

    /// Adds a post-mortem breakpoint. `Ok(false)` if it already exists,
    /// `Err` if the table is full.
    pub fn add_breakpoint(&mut self, filename: &str, line_number: u32) -> Result<bool, NavigatorError> {
        if self.breakpoints.len() >= MAX_BREAKPOINTS {
            return Err(NavigatorError::CapacityReached);
        }
        if self.breakpoints.iter().any(|(f, l)| f == filename && *l == line_number) {
            return Ok(false);
        }
        self.breakpoints.push((filename.to_string(), line_number));
        Ok(true)
    }

    /// Searches forward from just after the cursor for the next event
    /// matching any breakpoint. On no match, leaves the cursor at the end.
    pub fn continue_forward(&mut self) -> ContinueResult {
        if self.breakpoints.is_empty() {
            return ContinueResult::NoBreakpoints;
        }
        for i in (self.cursor + 1)..self.events.len() {
            if self.matches_any_breakpoint(i) {
                self.cursor = i;
                return ContinueResult::Hit;
            }
        }
        self.cursor = self.events.len() - 1;
        ContinueResult::NoneAhead
    }

    /// As [`Self::continue_forward`], but searching backward from just
    /// before the cursor. On no match, leaves the cursor at the start.
    pub fn reverse_continue(&mut self) -> ContinueResult {
        if self.breakpoints.is_empty() {
            return ContinueResult::NoBreakpoints;
        }
        for i in (0..self.cursor).rev() {
            if self.matches_any_breakpoint(i) {
                self.cursor = i;
                return ContinueResult::Hit;
            }
        }
        self.cursor = 0;
        ContinueResult::NoneBehind
    }

    fn matches_any_breakpoint(&self, index: usize) -> bool {
        let event = &self.events[index];
        self.breakpoints.iter().any(|bp| breakpoint_matches(bp, event))
    }

    /// Every event whose `variables` string contains `name`, in trace
    /// order, paired with the matching `name=...` fragments. Capped at 10
    /// events by the caller (`navigator/commands.rs`), matching the
    /// original tool's result limit.
    pub fn find(&self, name: &str) -> Vec<(&TraceEvent, Vec<&str>)> {
        self.events
            .iter()
            .filter_map(|event| {
                let fragments: Vec<&str> = event
                    .variables
                    .split(';')
                    .map(str::trim)
                    .filter(|frag| frag.starts_with(&format!("{name}=")))
                    .collect();
                if fragments.is_empty() {
                    None
                } else {
                    Some((event, fragments))
                }
            })
            .collect()
    }
}

/// The three-step, short-circuiting breakpoint match: exact filename
/// equality, then substring containment, then basename equality. Distinct
/// from the tracer's live [`crate::breakpoint::BreakpointTable`], which
/// only ever does exact matching -- the navigator allows the looser rules
/// because a post-mortem breakpoint is often set against a path typed by
/// hand rather than the trace's own canonical path.
pub fn breakpoint_matches(bp: &(String, u32), event: &TraceEvent) -> bool {
    if event.line_number != bp.1 {
        return false;
    }
    if event.filename == bp.0 {
        return true;
    }
    if event.filename.contains(bp.0.as_str()) {
        return true;
    }
    basename(&bp.0) == basename(&event.filename)
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
