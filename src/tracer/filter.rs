//! The skip filter: filenames the tracer never records, to keep a trace
//! focused on user code rather than the standard library or its own
//! internals.

/// Substrings that exclude a filename from tracing when present anywhere
/// in the path.
pub const SKIP_SUBSTRINGS: &[&str] = &[
    "site-packages",
    "/usr/lib",
    "/usr/local/lib",
    "python3.",
    "importlib",
    "cdebugger",
    "runner.py",
    "idebug.py",
];

/// True if `filename` should be discarded: angle-bracketed pseudo-files
/// (`<frozen ...>`, `<string>`) or anything matching [`SKIP_SUBSTRINGS`].
pub fn is_filtered(filename: &str) -> bool {
    filename.starts_with('<') || SKIP_SUBSTRINGS.iter().any(|needle| filename.contains(needle))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn filters_standard_library_paths() {
        assert!(is_filtered("/usr/lib/python3.11/os.py"));
        assert!(is_filtered("/home/me/.venv/site-packages/requests/api.py"));
    }

    #[test]
    fn filters_frozen_pseudo_files() {
        assert!(is_filtered("<frozen importlib._bootstrap>"));
        assert!(is_filtered("<string>"));
    }

    #[test]
    fn filters_debugger_internals() {
        assert!(is_filtered("/tmp/cdebugger/native.py"));
        assert!(is_filtered("runner.py"));
    }

    #[test]
    fn passes_through_ordinary_user_code() {
        assert!(!is_filtered("t.py"));
        assert!(!is_filtered("/home/me/project/main.py"));
    }
}
