//! Business logic services for the application layer.

pub mod link_registry;
pub mod token_allocator;

pub use link_registry::{LinkRegistry, ShortenInput, ShortenOutcome, validate_address};
pub use token_allocator::TokenAllocator;
