//! Store trait definitions for the domain layer.
//!
//! The domain only sees the [`LinkStore`] contract. Concrete backends live in
//! `crate::infrastructure::persistence`; a `mockall` mock is generated for
//! unit tests.

pub mod link_store;

pub use link_store::{LinkStore, Severity, StoreError, StoreResult};

#[cfg(test)]
pub use link_store::MockLinkStore;
