//! Boundary logging for polls and control requests
//!
//! Each public engine operation logs one `start` line, then exactly one
//! `end` or `end_error` line with `duration_ms`. Poll lines carry the
//! projection and the poll's `request_id` / `trace_id`. A poll result that
//! lands after a reset is logged once as `discarded` at debug level.
//!
//! The binary calls [`init()`] once; tests call
//! [`init_test_capture`](test_capture::init_test_capture) instead.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
