//! Loads a trace file written by the tracer into an ordered sequence of
//! [`TraceEvent`]s for the navigator to replay.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use crate::record::{TraceEvent, HEADER_LINE};

/// Trace files beyond this many events have their trailing records
/// dropped, so a runaway trace can't exhaust navigator memory.
pub const MAX_EVENTS: usize = 100_000;

#[derive(Debug)]
pub enum LoaderError {
    Io(io::Error),
}

impl From<io::Error> for LoaderError {
    fn from(err: io::Error) -> Self {
        LoaderError::Io(err)
    }
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoaderError {}

/// Reads `path`, skipping the header line, blank lines, and malformed
/// records (fewer than four `|||` separators), and returns the remaining
/// records in file order.
pub fn load(path: &str) -> Result<Vec<TraceEvent>, LoaderError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut events = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.as_str();
        if line.is_empty() || line == HEADER_LINE {
            continue;
        }
        if events.len() >= MAX_EVENTS {
            log::warn!("trace file exceeds {MAX_EVENTS} events; trailing records dropped");
            break;
        }
        match TraceEvent::parse_line(line) {
            Some(event) => events.push(event),
            None => log::debug!("skipping malformed trace record: {line}"),
        }
    }

    Ok(events)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn write_trace(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER_LINE}").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_well_formed_events_in_order() {
        let file = write_trace(&[
            "0|||t.py|||1|||x=1|||",
            "1|||t.py|||2|||y=x+1|||x=1",
            "2|||t.py|||3|||print(y)|||x=1;y=2",
        ]);
        let events = load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2].variables, "x=1;y=2");
    }

    #[test]
    fn skips_blank_and_malformed_lines() {
        let file = write_trace(&["", "0|||t.py|||1|||x=1|||", "not a valid record", "garbage|||only|||two"]);
        let events = load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn empty_trace_file_yields_no_events() {
        let file = write_trace(&[]);
        let events = load(file.path().to_str().unwrap()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load("/no/such/trace/file").is_err());
    }
}
