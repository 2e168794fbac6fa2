//! Utility functions for code generation and input checks.
//!
//! - [`code_generator`] - Random base62 short codes
//! - [`validators`] - URL, expiry-date and short-code patterns

pub mod code_generator;
pub mod validators;
