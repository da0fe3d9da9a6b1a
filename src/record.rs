//! The on-disk trace record schema shared by the tracer and the navigator.
//!
//! One event is one text line, fields joined by the literal delimiter
//! `|||`. There is no escaping: `CODE` and `VARIABLES` may themselves
//! contain `|||` or `;`, so parsing only ever splits on the first four
//! occurrences of the delimiter and treats everything after as the
//! `VARIABLES` field.

/// Field delimiter. Not escaped; see the module docs.
pub const DELIMITER: &str = "|||";

/// The literal header line that precedes all events in a trace file.
pub const HEADER_LINE: &str = "EXECUTION_ORDER|||FILENAME|||LINE_NUMBER|||CODE|||VARIABLES";

/// Sentinel substituted when a source line cannot be read.
pub const UNAVAILABLE: &str = "<unavailable>";

/// Sentinel substituted when a single variable's repr conversion fails.
pub const REPR_FAILURE: &str = "<e>";

/// One executed line, with its captured local variable bindings.
///
/// Immutable once written. `exec_order` is assigned densely, starting at 0,
/// in the order events are emitted within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub exec_order: u64,
    pub filename: String,
    pub line_number: u32,
    pub code: String,
    /// The already-joined `name=repr;name=repr...` text, exactly as written
    /// to (or read from) the trace file. Kept as a raw string rather than
    /// split into pairs because the delimiter is unescaped: splitting
    /// eagerly would silently corrupt a repr that itself contains `;`.
    pub variables: String,
}

impl TraceEvent {
    /// Renders this event as one trace-file line, without a trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{}{d}{}{d}{}{d}{}{d}{}",
            self.exec_order,
            self.filename,
            self.line_number,
            self.code,
            self.variables,
            d = DELIMITER
        )
    }

    /// Parses one non-header, non-blank trace-file line.
    ///
    /// Returns `None` if the line has fewer than four `|||` separators
    /// (a malformed record, per spec). Everything after the fourth
    /// separator -- including any further `|||` it may contain -- becomes
    /// the `variables` field verbatim.
    pub fn parse_line(line: &str) -> Option<TraceEvent> {
        let mut rest = line;
        let mut fields: Vec<&str> = Vec::with_capacity(5);

        for _ in 0..4 {
            let idx = rest.find(DELIMITER)?;
            fields.push(&rest[..idx]);
            rest = &rest[idx + DELIMITER.len()..];
        }
        fields.push(rest);

        let exec_order: u64 = fields[0].parse().ok()?;
        let line_number: u32 = fields[2].parse().ok()?;

        Some(TraceEvent {
            exec_order,
            filename: fields[1].to_string(),
            line_number,
            code: fields[3].to_string(),
            variables: fields[4].to_string(),
        })
    }
}

/// Joins `(name, repr)` pairs into the `VARIABLES` field's on-disk form.
pub fn serialize_variables<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut out = String::new();
    for (i, (name, repr)) in pairs.enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push_str(name);
        out.push('=');
        out.push_str(repr);
    }
    out
}
