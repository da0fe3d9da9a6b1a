//! Per-event handling: the interactive pause protocol and trace record
//! emission, run once per [`crate::tracer::on_line_event`] call that makes
//! it past the event-kind and skip-filter checks.

use std::io::Write;

use crate::frame::Frame;
use crate::history::StepHistoryEntry;
use crate::record::{self, TraceEvent};
use crate::repl;

use super::{Session, StepMode, BREAKPOINTS};

pub(super) fn handle_line_event(session: &mut Session, frame: &dyn Frame) {
    let filename = frame.filename().to_string();
    let line_number = frame.line_number();

    if !session.paused {
        let hit = BREAKPOINTS.lock().unwrap().check_hit(&filename, line_number).map(|bp| bp.hit_count);
        if let Some(hit_count) = hit {
            session.paused = true;
            let code = session.source_cache.line(&filename, line_number);
            print_breakpoint_banner(&filename, line_number, hit_count, &code);
            run_pause_prompt(session);
        } else if session.step_mode == StepMode::StepNext {
            session.paused = true;
            session.step_mode = StepMode::None;
            let code = session.source_cache.line(&filename, line_number);
            print_step_banner(&filename, line_number, &code);
            run_pause_prompt(session);
        }
    }

    // Event emission happens on every processed line, whether or not a
    // pause occurred above.
    let code = session.source_cache.line(&filename, line_number);
    let variables = serialize_frame_locals(frame);

    let exec_order = session.exec_counter;
    session.exec_counter += 1;

    let event = TraceEvent {
        exec_order,
        filename: filename.clone(),
        line_number,
        code: code.clone(),
        variables: variables.clone(),
    };
    if let Err(err) = writeln!(session.sink, "{}", event.to_line()) {
        log::warn!("failed to write trace record: {err}");
    }
    let _ = session.sink.flush();

    session
        .history
        .push(exec_order, &filename, line_number, &code, &variables);
}

fn serialize_frame_locals(frame: &dyn Frame) -> String {
    let pairs: Vec<(String, String)> = frame
        .locals()
        .map(|(name, repr)| {
            let repr = repr.unwrap_or_else(|_| record::REPR_FAILURE.to_string());
            (name, repr)
        })
        .collect();
    record::serialize_variables(pairs.iter().map(|(name, repr)| (name.as_str(), repr.as_str())))
}

/// Blocks on commands from `session.input` until one resumes execution
/// (`c`, `n`, end-of-input) or terminates the process (`q`).
fn run_pause_prompt(session: &mut Session) {
    loop {
        let cmd = match repl::read_command(&mut session.input, "\n(trace) > ") {
            Some(cmd) => cmd,
            None => {
                // End-of-input is treated the same as `c`.
                session.paused = false;
                session.step_mode = StepMode::None;
                return;
            }
        };

        match cmd.as_str() {
            "c" => {
                session.paused = false;
                session.step_mode = StepMode::None;
                return;
            }
            "n" => {
                session.paused = false;
                session.step_mode = StepMode::StepNext;
                return;
            }
            "b" => match session.history.step_back() {
                Some(entry) => print_history_entry(entry),
                None => println!("(no earlier history)"),
            },
            "h" => {
                let (entries, cursor) = session.history.recent(10);
                print_history(entries, cursor);
            }
            "q" => std::process::exit(0),
            "" => {}
            other => println!("unknown command: {other}"),
        }
    }
}

fn print_breakpoint_banner(filename: &str, line_number: u32, hit_count: u64, code: &str) {
    println!("\n=== breakpoint hit ({hit_count}) ===");
    println!("{filename}:{line_number}  {code}");
    println!("[c]ontinue  [n]ext  [b]ack  [h]istory  [q]uit");
}

fn print_step_banner(filename: &str, line_number: u32, code: &str) {
    println!("\n=== step ===");
    println!("{filename}:{line_number}  {code}");
}

fn print_history_entry(entry: &StepHistoryEntry) {
    println!(
        "[{}] {}:{}  {}  {}",
        entry.exec_order, entry.filename, entry.line_number, entry.code, entry.variables_snapshot
    );
}

fn print_history(entries: &[StepHistoryEntry], cursor: usize) {
    for (i, entry) in entries.iter().enumerate() {
        let marker = if i == cursor { ">" } else { " " };
        println!(
            "{marker} [{}] {}:{}  {}",
            entry.exec_order, entry.filename, entry.line_number, entry.code
        );
    }
}
