//! Domain layer containing the link model and its lifecycle rules.
//!
//! # Architecture
//!
//! - [`entities`] - The link record and its enums
//! - [`lifecycle`] - Expiration and hit-counting state machine
//! - [`repositories`] - Store trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Store traits define contracts implemented by the infrastructure layer
//! - Orchestration (I/O, retries, timeouts) lives in
//!   [`crate::application::services`]

pub mod entities;
pub mod lifecycle;
pub mod repositories;
