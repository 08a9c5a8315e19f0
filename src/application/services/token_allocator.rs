//! Token allocation: slug reservation and random token generation.

use std::sync::Arc;

use crate::domain::errors::{AllocationError, RepositoryError};
use crate::domain::repositories::LinkRepository;
use crate::utils::token::{TokenSource, validate_slug};

/// Produces tokens that are not currently bound to a link.
///
/// Reservation is advisory. The existence check here is only a pre-check;
/// the storage uniqueness constraint has the final word at insert time.
pub struct TokenAllocator<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    source: Arc<dyn TokenSource>,
}

impl<R: LinkRepository + ?Sized> TokenAllocator<R> {
    pub fn new(repository: Arc<R>, source: Arc<dyn TokenSource>) -> Self {
        Self { repository, source }
    }

    /// Validates a caller-supplied slug and checks that it is free.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::InvalidSlug`] if `candidate` is empty or has characters
    ///   outside `[A-Za-z0-9_-]`
    /// - [`AllocationError::SlugTaken`] if a link already uses it
    /// - [`AllocationError::Storage`] if the existence check fails
    pub async fn reserve_slug(&self, candidate: &str) -> Result<String, AllocationError> {
        validate_slug(candidate)?;

        if self.is_taken(candidate).await? {
            return Err(AllocationError::SlugTaken {
                slug: candidate.to_string(),
            });
        }

        Ok(candidate.to_string())
    }

    /// Draws a fresh random token. Does not consult storage.
    pub fn generate_token(&self) -> String {
        self.source.next_token()
    }

    /// Returns whether a link with this token exists right now.
    pub async fn is_taken(&self, token: &str) -> Result<bool, RepositoryError> {
        Ok(self.repository.find_by_token(token).await?.is_some())
    }
}
