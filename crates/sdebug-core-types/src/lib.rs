//! Identifiers and log vocabulary shared by every sdebug crate
//!
//! Kept dependency-light so the logging macros in `sdebug-core` can name
//! these types from any crate that logs.

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
pub use schema::OpEvent;
