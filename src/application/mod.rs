//! Application layer services implementing the link core.
//!
//! Services consume repository traits and expose an HTTP-independent API:
//!
//! - [`services::token_allocator::TokenAllocator`] - Slug reservation and token generation
//! - [`services::link_registry::LinkRegistry`] - Shorten and resolve operations

pub mod services;
