#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the output collaborator used by the log emitter:
//! a [`LineSink`] that renders any [`std::fmt::Display`] value into a reusable
//! scratch buffer and forwards it to an [`std::io::Write`] implementor in a
//! single `write_all` call.
//!
//! # Design
//!
//! The sink owns the writer together with a `String` scratch buffer that is
//! cleared, not reallocated, between lines. Every rendered item ends with a
//! newline, matching the emitter's one-record-per-line output.
//!
//! # Invariants
//!
//! - Each call to [`LineSink::write`] issues exactly one `write_all` on the
//!   underlying writer, so a line is never split across two writes by the sink.
//!
//! # Errors
//!
//! All operations surface [`std::io::Error`] values originating from the
//! underlying writer. Formatting failures of the rendered value are reported
//! as [`std::io::ErrorKind::Other`].
//!
//! # Examples
//!
//! ```
//! use logging_sink::LineSink;
//!
//! let mut sink = LineSink::new(Vec::new());
//! sink.write("first").unwrap();
//! sink.write(format_args!("second {}", 2)).unwrap();
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "first\nsecond 2\n");
//! ```

mod sink;

pub use sink::LineSink;
