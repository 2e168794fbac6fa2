//! HTTP request handlers.

pub mod create_link;
pub mod health;
pub mod redirect;

pub use create_link::create_link_handler;
pub use health::health_handler;
pub use redirect::{not_found_handler, redirect_handler};
