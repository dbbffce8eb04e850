//! Common Test Utilities
//!
//! Shared record builders used across the unit and property tests.

pub mod fixtures;

pub use fixtures::*;
