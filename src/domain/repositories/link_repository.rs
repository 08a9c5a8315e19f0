//! Repository trait for link persistence.

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;

/// Storage contract required by the link registry.
///
/// Token uniqueness must be enforced by the store itself, not by callers: two
/// writers that both saw a token as free may race, and at most one insert wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its target address.
    ///
    /// Addresses are not unique; when several links share one, the oldest is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] on storage errors.
    async fn find_by_address(&self, address: &str) -> Result<Option<Link>, RepositoryError>;

    /// Finds a link by its token.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] on storage errors.
    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, RepositoryError>;

    /// Inserts a new link with `access_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::UniqueViolation`] if the token already exists.
    /// Returns [`RepositoryError::Database`] on storage errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError>;

    /// Atomically bumps the access counter by one and touches `updated_at`.
    ///
    /// Returns the link as it is after the increment. Concurrent callers never
    /// lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no link has this token; no row is created.
    /// Returns [`RepositoryError::Database`] on storage errors.
    async fn increment_access_count(&self, token: &str) -> Result<Link, RepositoryError>;

    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] on storage errors.
    async fn count(&self) -> Result<i64, RepositoryError>;
}
