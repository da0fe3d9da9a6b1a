//! Coverage of the tracer's interactive pause protocol: breakpoint hits,
//! step mode, and the step-history ring's overflow boundary.

use std::io::Cursor;
use std::sync::Mutex;

use timetrace::tracer::{self, start_trace_with_input, TraceError};
use timetrace::{EventKind, Frame, ReprResult};

static SESSION_LOCK: Mutex<()> = Mutex::new(());

fn with_isolated_session(body: impl FnOnce()) {
    let _guard = SESSION_LOCK.lock().unwrap();
    tracer::stop_trace();
    tracer::clear_breakpoints();
    body();
    tracer::stop_trace();
    tracer::clear_breakpoints();
}

struct ScriptedFrame {
    filename: String,
    line_number: u32,
}

impl Frame for ScriptedFrame {
    fn filename(&self) -> &str {
        &self.filename
    }
    fn line_number(&self) -> u32 {
        self.line_number
    }
    fn locals(&self) -> Box<dyn Iterator<Item = (String, ReprResult)> + '_> {
        Box::new(std::iter::empty())
    }
}

fn frame(line_number: u32) -> ScriptedFrame {
    ScriptedFrame {
        filename: "t.py".to_string(),
        line_number,
    }
}

// S4: a breakpoint at t.py:2, with the user sending `c` at the pause.
// The resulting trace has one entry per line and the breakpoint's
// hit_count is 1.
#[test]
fn s4_breakpoint_hit_then_continue_produces_the_full_trace() {
    with_isolated_session(|| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s4.trace");

        assert!(tracer::set_breakpoint("t.py", 2)); // honored even with no session yet

        start_trace_with_input(path.to_str().unwrap(), Box::new(Cursor::new(b"c\n".to_vec()))).unwrap();

        tracer::on_line_event(&frame(1), EventKind::Line);
        tracer::on_line_event(&frame(2), EventKind::Line); // hits the breakpoint, reads "c"
        tracer::on_line_event(&frame(3), EventKind::Line);
        tracer::stop_trace();

        let events = timetrace::loader::load(path.to_str().unwrap()).unwrap();
        assert_eq!(events.len(), 3);
    });
}

// Invariant: while paused, no further events are emitted until the pause
// prompt resolves -- here, a multi-line scripted session of "n" (step) then
// "c" (continue) correctly single-steps once before running to completion.
#[test]
fn step_mode_pauses_again_on_the_very_next_line() {
    with_isolated_session(|| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("step.trace");
        tracer::set_breakpoint("t.py", 1);

        // at line 1: breakpoint hit, send "n" (step) -> pauses again at line 2,
        // send "c" (continue) -> runs to completion.
        start_trace_with_input(path.to_str().unwrap(), Box::new(Cursor::new(b"n\nc\n".to_vec()))).unwrap();
        tracer::set_breakpoint("t.py", 1);

        tracer::on_line_event(&frame(1), EventKind::Line); // bp hit, "n"
        tracer::on_line_event(&frame(2), EventKind::Line); // step-paused, "c"
        tracer::on_line_event(&frame(3), EventKind::Line);
        tracer::stop_trace();

        let events = timetrace::loader::load(path.to_str().unwrap()).unwrap();
        assert_eq!(events.len(), 3);
    });
}

// End-of-input while paused is treated as "continue", not an error or hang.
#[test]
fn eof_while_paused_resumes_execution() {
    with_isolated_session(|| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eof.trace");
        start_trace_with_input(path.to_str().unwrap(), Box::new(Cursor::new(Vec::new()))).unwrap();
        tracer::set_breakpoint("t.py", 1);

        tracer::on_line_event(&frame(1), EventKind::Line);
        tracer::on_line_event(&frame(2), EventKind::Line);
        tracer::stop_trace();

        let events = timetrace::loader::load(path.to_str().unwrap()).unwrap();
        assert_eq!(events.len(), 2);
    });
}

#[test]
fn starting_a_session_twice_fails_without_disturbing_the_first() {
    with_isolated_session(|| {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.trace");
        let second = dir.path().join("second.trace");

        start_trace_with_input(first.to_str().unwrap(), Box::new(Cursor::new(Vec::new()))).unwrap();
        match start_trace_with_input(second.to_str().unwrap(), Box::new(Cursor::new(Vec::new()))) {
            Err(TraceError::AlreadyTracing) => {}
            other => panic!("expected AlreadyTracing, got {other:?}"),
        }
        assert_eq!(tracer::get_trace_filename().as_deref(), first.to_str());
    });
}

// Invariant: while paused, the exec counter does not advance. Sending a
// history command ("h") at the pause prompt before "c" must not itself
// produce or count an event -- only the three real line events do.
#[test]
fn exec_counter_does_not_advance_while_paused() {
    with_isolated_session(|| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pause.trace");

        start_trace_with_input(path.to_str().unwrap(), Box::new(Cursor::new(b"h\nc\n".to_vec()))).unwrap();
        tracer::set_breakpoint("t.py", 2);

        tracer::on_line_event(&frame(1), EventKind::Line);
        tracer::on_line_event(&frame(2), EventKind::Line); // bp hit, "h" then "c"
        tracer::on_line_event(&frame(3), EventKind::Line);
        tracer::stop_trace();

        let events = timetrace::loader::load(path.to_str().unwrap()).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].exec_order, 0);
        assert_eq!(events[1].exec_order, 1);
        assert_eq!(events[2].exec_order, 2);
    });
}

// Invariant: stop_trace and clear_breakpoints are idempotent -- calling
// either repeatedly with no active session has the same effect as calling
// it once, rather than panicking or erroring.
#[test]
fn stop_trace_and_clear_breakpoints_are_idempotent() {
    with_isolated_session(|| {
        tracer::stop_trace();
        tracer::stop_trace();
        tracer::stop_trace();
        assert_eq!(tracer::get_trace_filename(), None);

        tracer::clear_breakpoints();
        tracer::clear_breakpoints();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idempotent.trace");
        start_trace_with_input(path.to_str().unwrap(), Box::new(Cursor::new(Vec::new()))).unwrap();
        assert!(tracer::set_breakpoint("t.py", 1));

        tracer::clear_breakpoints();
        tracer::clear_breakpoints();

        // with no breakpoints left, a line at 1 does not pause.
        tracer::on_line_event(&frame(1), EventKind::Line);
        tracer::stop_trace();
        tracer::stop_trace();

        let events = timetrace::loader::load(path.to_str().unwrap()).unwrap();
        assert_eq!(events.len(), 1);
    });
}

// 1,001 recorded lines: the step-history ring caps at 1,000 entries while
// every line still makes it into the trace file itself.
#[test]
fn step_history_overflow_does_not_affect_the_written_trace() {
    with_isolated_session(|| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overflow.trace");
        start_trace_with_input(path.to_str().unwrap(), Box::new(Cursor::new(Vec::new()))).unwrap();

        for _ in 0..1_001 {
            tracer::on_line_event(&frame(1), EventKind::Line);
        }
        tracer::stop_trace();

        let events = timetrace::loader::load(path.to_str().unwrap()).unwrap();
        assert_eq!(events.len(), 1_001);
        assert_eq!(events.last().unwrap().exec_order, 1_000);
    });
}
