//! `timetrace`: a line-level time-traveling tracer and a post-mortem trace
//! navigator for a dynamic, interpreted host language.
//!
//! A host interpreter drives the tracer by calling [`on_line_event`] once
//! per executed line, passing a [`Frame`] implementation and an
//! [`EventKind`]. The tracer writes a `|||`-delimited trace file
//! ([`record`]) that the [`navigator`] binary later loads ([`loader`]) and
//! lets a user step, search, and set post-mortem breakpoints against.
//!
//! ```no_run
//! use timetrace::{on_line_event, start_trace, stop_trace, EventKind, Frame, ReprResult};
//!
//! struct HostFrame;
//! impl Frame for HostFrame {
//!     fn filename(&self) -> &str { "example.py" }
//!     fn line_number(&self) -> u32 { 1 }
//!     fn locals(&self) -> Box<dyn Iterator<Item = (String, ReprResult)> + '_> {
//!         Box::new(std::iter::empty())
//!     }
//! }
//!
//! start_trace("session.trace").unwrap();
//! on_line_event(&HostFrame, EventKind::Line);
//! stop_trace();
//! ```

pub mod breakpoint;
pub mod frame;
pub mod history;
pub mod loader;
pub mod navigator;
pub mod record;
pub(crate) mod repl;
pub mod source_cache;
pub mod tracer;

pub use frame::{EventKind, Frame, ReprResult};
pub use record::TraceEvent;
pub use tracer::{
    clear_breakpoints, get_trace_filename, on_line_event, set_breakpoint, start_trace, stop_trace, TraceError,
};
