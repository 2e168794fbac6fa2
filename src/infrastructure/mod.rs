//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Link store backends (memory, PostgreSQL, Redis)

pub mod persistence;
