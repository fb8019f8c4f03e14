//! Observability for docbridge
//!
//! Structured JSON logging only: one line per event, synchronous writes,
//! deterministic key ordering. The callback path leans on this hard —
//! its failures are swallowed by protocol contract, so the log line is
//! the only trace they leave.

mod logger;

pub use logger::{Logger, Severity};
