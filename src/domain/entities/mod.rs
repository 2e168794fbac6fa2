//! Core domain entities.
//!
//! The service persists exactly one entity, [`LinkRecord`], keyed by its
//! short code. [`NewLink`] is the validated creation input before a code is
//! assigned.

pub mod link;

pub use link::{LinkMode, LinkRecord, LinkStatus, NewLink, RedirectType, parse_expiry_date};
