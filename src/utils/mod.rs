//! Utility functions shared across layers.
//!
//! - [`token`] - Random token generation and slug validation

pub mod token;
