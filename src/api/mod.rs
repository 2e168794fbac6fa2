//! HTTP API layer.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses: JSON for creation, bare redirects for lookups.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies and creation validation
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing and CORS layers
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
