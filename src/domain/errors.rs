//! Error taxonomy of the link core.
//!
//! Validation failures are detected before any write and are reported as-is.
//! [`RepositoryError::UniqueViolation`] is the only error the registry recovers
//! from locally; everything else is scoped to the single request.

use thiserror::Error;

/// Name of the storage constraint guarding token uniqueness.
pub const TOKEN_UNIQUE_CONSTRAINT: &str = "links_token_key";

/// Failures reported by a [`crate::domain::repositories::LinkRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An insert lost the race for a token that another writer claimed first.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("link not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl RepositoryError {
    pub fn token_taken() -> Self {
        Self::UniqueViolation {
            constraint: TOKEN_UNIQUE_CONSTRAINT.to_string(),
        }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return Self::UniqueViolation {
                constraint: db.constraint().unwrap_or("unknown").to_string(),
            };
        }

        Self::Database(e)
    }
}

/// Failures of the token allocator.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("slug '{slug}' may only contain letters, digits, '-' and '_'")]
    InvalidSlug { slug: String },

    #[error("slug '{slug}' is already taken")]
    SlugTaken { slug: String },

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// Failures of [`crate::application::services::LinkRegistry::shorten`].
#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("invalid target address: {reason}")]
    InvalidAddress { reason: &'static str },

    #[error("slug '{slug}' may only contain letters, digits, '-' and '_'")]
    InvalidSlug { slug: String },

    #[error("slug '{slug}' is already taken")]
    Conflict { slug: String },

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl From<AllocationError> for ShortenError {
    fn from(e: AllocationError) -> Self {
        match e {
            AllocationError::InvalidSlug { slug } => Self::InvalidSlug { slug },
            AllocationError::SlugTaken { slug } => Self::Conflict { slug },
            AllocationError::Storage(e) => Self::Storage(e),
        }
    }
}

/// Failures of [`crate::application::services::LinkRegistry::resolve`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no link for token '{token}'")]
    NotFound { token: String },

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_taken_becomes_conflict() {
        let err: ShortenError = AllocationError::SlugTaken {
            slug: "my-link".to_string(),
        }
        .into();

        assert!(matches!(err, ShortenError::Conflict { ref slug } if slug == "my-link"));
    }

    #[test]
    fn test_invalid_slug_is_kept() {
        let err: ShortenError = AllocationError::InvalidSlug {
            slug: "a b".to_string(),
        }
        .into();

        assert!(matches!(err, ShortenError::InvalidSlug { .. }));
        assert!(err.to_string().contains("'a b'"));
    }

    #[test]
    fn test_token_taken_names_constraint() {
        let err = RepositoryError::token_taken();
        assert!(err.to_string().contains(TOKEN_UNIQUE_CONSTRAINT));
    }

    #[test]
    fn test_plain_sqlx_error_is_database() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
