//! sdebug HTTP - REST backend for the reconciliation engine
//!
//! Implements the engine's fetch and control capabilities against the
//! simulation's REST surface using `reqwest`.

#![allow(clippy::result_large_err)]

pub mod client;
pub mod routes;

pub use client::{HttpBackend, HttpConfig};
