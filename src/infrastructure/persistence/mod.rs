//! Link store backends.
//!
//! Concrete implementations of [`crate::domain::repositories::LinkStore`].
//! Records cross the store boundary as JSON (see `codec`).
//!
//! # Backends
//!
//! - [`MemoryLinkStore`] - Process-local map, used in tests and development
//! - [`PgLinkStore`] - PostgreSQL key-value table
//! - [`RedisLinkStore`] - One Redis string per code

mod codec;
pub mod memory_link_store;
pub mod pg_link_store;
pub mod redis_link_store;

pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;
pub use redis_link_store::RedisLinkStore;
