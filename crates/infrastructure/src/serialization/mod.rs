//! JSON serialization for persisted documents.
//!
//! Output is stable across load/save cycles:
//! - Insertion-ordered maps (`IndexMap`) keep their order
//! - 2-space indentation
//! - Trailing newline

mod json;

pub use json::*;
