//! HTTP middleware for request processing.
//!
//! Provides request tracing and the CORS policy.

pub mod cors;
pub mod tracing;
