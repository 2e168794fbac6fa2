//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization; the creation payload also
//! carries the creation validation rules.

pub mod create_link;
pub mod health;
