//! Crate-internal test support and property suites.
//!
//! Per-module unit tests live next to the code in `#[cfg(test)]` blocks;
//! this tree holds the shared fixtures and the proptest invariants.

pub mod common;
mod property;
