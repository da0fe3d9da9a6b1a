//! The line-oriented command prompt shared by the tracer's pause protocol
//! and the navigator. Both read one line at a time from an injected
//! `dyn BufRead`; neither owns its own notion of stdin, so production code
//! (a real terminal) and tests (a `Cursor<&[u8]>`) drive the identical loop.

use std::io::{self, BufRead, Write};

/// Prints `prompt`, then reads and trims one line from `input`.
///
/// Returns `None` on end-of-input, which both callers treat as "resume" /
/// "exit cleanly" rather than an error.
pub(crate) fn read_command(input: &mut dyn BufRead, prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(err) => {
            log::warn!("failed to read command: {err}");
            None
        }
    }
}
