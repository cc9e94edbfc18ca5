//! Repository architecture checks.
//!
//! This crate has no library code; the checks live in `tests/`.
