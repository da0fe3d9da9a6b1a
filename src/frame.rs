//! The boundary between the tracer and a host interpreter's per-line
//! callback stream.
//!
//! A host wires its interpreter's trace hook to [`crate::tracer::on_line_event`],
//! passing a [`Frame`] implementation for the currently executing frame and
//! the [`EventKind`] being reported -- the Rust equivalent of the C
//! extension callback's `(PyFrameObject *frame, int what, PyObject *arg)`.

/// The kind of event a host is reporting for the current frame.
///
/// Only [`EventKind::Line`] is processed by the tracer; every other kind is
/// discarded immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Line,
    Call,
    Return,
    Exception,
    Other,
}

/// A value's textual representation, as the host's interpreter would print
/// it, or `Err(())` if producing one failed (e.g. a user `__repr__` raised).
pub type ReprResult = Result<String, ()>;

/// A single stack frame, as reported by the host interpreter.
///
/// The tracer only ever reads through this trait; it never reaches back
/// into host state.
pub trait Frame {
    /// Path of the file executing this frame, as the host names it.
    fn filename(&self) -> &str;

    /// 1-based line number currently executing.
    fn line_number(&self) -> u32;

    /// The frame's local bindings, in the host's iteration order. A frame
    /// with no locals yields an empty iterator rather than requiring a
    /// special case.
    fn locals(&self) -> Box<dyn Iterator<Item = (String, ReprResult)> + '_>;
}
