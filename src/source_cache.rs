//! Memoized source-line lookups, shared by the tracer and the navigator.

use std::collections::HashMap;
use std::fs;

use crate::record::UNAVAILABLE;

/// Fetches individual source lines from disk, caching each file's contents
/// after the first read.
///
/// Purely advisory: a missing file, a permission error, or an out-of-range
/// line number all resolve to [`UNAVAILABLE`] rather than propagating a
/// failure, since a bad source line must never abort a trace session.
#[derive(Debug, Default)]
pub struct SourceCache {
    files: HashMap<String, Vec<String>>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the 1-based `line_number` of `filename`, or `"<unavailable>"`.
    pub fn line(&mut self, filename: &str, line_number: u32) -> String {
        if line_number == 0 {
            return UNAVAILABLE.to_string();
        }

        if !self.files.contains_key(filename) {
            let lines = match fs::read_to_string(filename) {
                Ok(contents) => contents.lines().map(str::to_string).collect(),
                Err(err) => {
                    log::debug!("source cache: cannot read {filename}: {err}");
                    Vec::new()
                }
            };
            self.files.insert(filename.to_string(), lines);
        }

        self.files
            .get(filename)
            .and_then(|lines| lines.get(line_number as usize - 1))
            .cloned()
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }
}
