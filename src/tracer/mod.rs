//! The tracer engine: a process-wide session that records a host
//! interpreter's execution into a trace file, pausing interactively on
//! breakpoints or single steps.
//!
//! Modeled after the teacher's `trace.rs`: a single owned session object
//! behind a lazily-initialized global, reached through a small set of
//! lifecycle functions rather than a struct the host constructs directly --
//! necessary here because the host calls across an FFI-shaped boundary
//! (`start_trace`/`stop_trace`/`set_breakpoint`) with no Rust object to
//! hold onto between calls.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::breakpoint::BreakpointTable;
use crate::frame::{EventKind, Frame};
use crate::history::StepHistory;
use crate::record::HEADER_LINE;
use crate::source_cache::SourceCache;

mod callback;
mod filter;

pub use filter::is_filtered;

/// Errors raised by the tracer's lifecycle functions.
#[derive(Debug)]
pub enum TraceError {
    /// `start_trace` was called while a session was already active.
    AlreadyTracing,
    /// The trace sink could not be created or written to.
    SinkOpenFailed(io::Error),
}

impl From<io::Error> for TraceError {
    fn from(err: io::Error) -> Self {
        TraceError::SinkOpenFailed(err)
    }
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceError::AlreadyTracing => write!(f, "tracing is already active"),
            TraceError::SinkOpenFailed(err) => write!(f, "cannot open trace file: {err}"),
        }
    }
}

impl std::error::Error for TraceError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepMode {
    None,
    StepNext,
}

pub(crate) struct Session {
    pub(crate) sink: File,
    pub(crate) path: String,
    pub(crate) exec_counter: u64,
    pub(crate) paused: bool,
    pub(crate) step_mode: StepMode,
    pub(crate) history: StepHistory,
    pub(crate) source_cache: SourceCache,
    pub(crate) input: Box<dyn BufRead + Send>,
}

static SESSION: Lazy<Mutex<Option<Session>>> = Lazy::new(|| Mutex::new(None));

/// The live breakpoint table. Kept independent of `SESSION`: breakpoints can
/// be set before a session exists and survive across `start_trace`/
/// `stop_trace` cycles, cleared only by [`clear_breakpoints`] -- matching the
/// original source's separate global breakpoint list.
pub(crate) static BREAKPOINTS: Lazy<Mutex<BreakpointTable>> = Lazy::new(|| Mutex::new(BreakpointTable::new()));

/// Starts a tracing session, writing records to `filename`.
///
/// Fails with [`TraceError::AlreadyTracing`] if a session is already active,
/// or with [`TraceError::SinkOpenFailed`] if the file cannot be created.
pub fn start_trace(filename: &str) -> Result<(), TraceError> {
    start_trace_with_input(filename, Box::new(BufReader::new(io::stdin())))
}

/// As [`start_trace`], but lets the caller supply the stream the pause
/// prompt reads commands from. Production hosts should use [`start_trace`];
/// this exists so the pause protocol can be driven from an in-memory
/// `Cursor` in tests, without a real terminal.
pub fn start_trace_with_input(filename: &str, input: Box<dyn BufRead + Send>) -> Result<(), TraceError> {
    let mut guard = SESSION.lock().unwrap();
    if guard.is_some() {
        return Err(TraceError::AlreadyTracing);
    }

    let mut sink = File::create(filename)?;
    writeln!(sink, "{HEADER_LINE}")?;
    sink.flush()?;

    *guard = Some(Session {
        sink,
        path: filename.to_string(),
        exec_counter: 0,
        paused: false,
        step_mode: StepMode::None,
        history: StepHistory::new(),
        source_cache: SourceCache::new(),
        input,
    });

    log::info!("tracing started: {filename}");
    Ok(())
}

/// Stops the current session, if any. Idempotent: calling this with no
/// active session is a no-op.
pub fn stop_trace() {
    let mut guard = SESSION.lock().unwrap();
    if guard.take().is_some() {
        log::info!("tracing stopped");
    }
}

/// Adds a breakpoint to the live table. Works whether or not a tracing
/// session is currently active, and the breakpoint survives across
/// `start_trace`/`stop_trace` cycles until [`clear_breakpoints`] runs.
pub fn set_breakpoint(filename: &str, line_number: u32) -> bool {
    BREAKPOINTS.lock().unwrap().set(filename, line_number);
    log::debug!("breakpoint set at {filename}:{line_number}");
    true
}

/// Clears every live breakpoint.
pub fn clear_breakpoints() {
    BREAKPOINTS.lock().unwrap().clear();
}

/// Returns the path of the trace file currently being written, if any.
pub fn get_trace_filename() -> Option<String> {
    let guard = SESSION.lock().unwrap();
    guard.as_ref().map(|session| session.path.clone())
}

/// The per-line hook a host installs as its interpreter's trace function.
///
/// Only [`EventKind::Line`] is processed; every other kind, and every frame
/// whose filename matches the skip filter, returns immediately without
/// touching session state.
pub fn on_line_event(frame: &dyn Frame, kind: EventKind) {
    if kind != EventKind::Line {
        return;
    }
    if is_filtered(frame.filename()) {
        return;
    }

    let mut guard = SESSION.lock().unwrap();
    let session = match guard.as_mut() {
        Some(session) => session,
        None => return,
    };

    callback::handle_line_event(session, frame);
}
