//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations: it drives the store through
//! the [`crate::domain::repositories::LinkStore`] trait, applies the
//! lifecycle rules and bounds every store call in time.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation and redirect resolution

pub mod services;
