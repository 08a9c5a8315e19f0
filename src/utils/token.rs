//! Token generation and slug validation.
//!
//! Generation is pure: nothing here touches storage. Callers own the
//! collision check and the retry loop.

use crate::domain::errors::AllocationError;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use regex::Regex;
use std::sync::{LazyLock, Mutex};

/// Number of random bytes behind a generated token.
pub const TOKEN_BYTES: usize = 3;

/// Length of a generated token once hex-encoded.
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

/// Character class every token and slug must match.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("slug pattern is valid"));

/// Source of fresh random tokens.
pub trait TokenSource: Send + Sync {
    /// Returns a new token. Never fails and never checks for collisions.
    fn next_token(&self) -> String;
}

/// Tokens drawn from the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsTokenSource;

impl TokenSource for OsTokenSource {
    /// # Panics
    ///
    /// Panics if the system random number generator fails (extremely rare).
    fn next_token(&self) -> String {
        let mut buffer = [0u8; TOKEN_BYTES];

        getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

        hex::encode(buffer)
    }
}

/// Deterministic tokens from a seeded generator, for reproducible runs.
#[derive(Debug)]
pub struct SeededTokenSource {
    rng: Mutex<StdRng>,
}

impl SeededTokenSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl TokenSource for SeededTokenSource {
    fn next_token(&self) -> String {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        generate_token(&mut *rng)
    }
}

/// Renders [`TOKEN_BYTES`] bytes from `rng` as lowercase hex.
pub fn generate_token<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut buffer = [0u8; TOKEN_BYTES];
    rng.fill_bytes(&mut buffer);
    hex::encode(buffer)
}

/// Checks a user-requested slug against `[A-Za-z0-9_-]+`.
///
/// # Errors
///
/// Returns [`AllocationError::InvalidSlug`] for the empty string or any other character.
pub fn validate_slug(candidate: &str) -> Result<(), AllocationError> {
    if SLUG_REGEX.is_match(candidate) {
        Ok(())
    } else {
        Err(AllocationError::InvalidSlug {
            slug: candidate.to_string(),
        })
    }
}
