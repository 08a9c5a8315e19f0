//! Core domain entities.
//!
//! - [`Link`] - A persisted token → address mapping with its access counter
//! - [`NewLink`] - Insert payload for a link
//! - [`LinkView`] - What callers of the registry get to see

pub mod link;

pub use link::{Link, LinkView, NewLink};
