//! Link registry: shortening and resolution of gurt addresses.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::token_allocator::TokenAllocator;
use crate::domain::entities::{Link, LinkView, NewLink};
use crate::domain::errors::{RepositoryError, ResolveError, ShortenError};
use crate::domain::repositories::LinkRepository;
use crate::utils::token::{TokenSource, validate_slug};

/// Scheme every target address must start with.
pub const ADDRESS_PREFIX: &str = "gurt://";

/// Input of a shorten request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenInput {
    pub target_address: String,
    pub requested_slug: Option<String>,
}

impl ShortenInput {
    pub fn new(target_address: impl Into<String>) -> Self {
        Self {
            target_address: target_address.into(),
            requested_slug: None,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.requested_slug = Some(slug.into());
        self
    }
}

/// Result of a successful shorten.
///
/// `created` is false when an existing link for the same address was reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub view: LinkView,
    pub created: bool,
}

/// Owns every write to the link store.
///
/// Token uniqueness is enforced by the repository; the registry turns a lost
/// insert race into a retry (anonymous path) or a conflict (slug path).
/// Address dedup is a best-effort lookup and is not transactional: two
/// concurrent anonymous requests for a brand-new address may both mint a token.
pub struct LinkRegistry<R: LinkRepository + ?Sized = dyn LinkRepository> {
    repository: Arc<R>,
    allocator: TokenAllocator<R>,
}

impl<R: LinkRepository + ?Sized> LinkRegistry<R> {
    /// Creates a registry over `repository`, drawing random tokens from `source`.
    pub fn new(repository: Arc<R>, source: Arc<dyn TokenSource>) -> Self {
        let allocator = TokenAllocator::new(Arc::clone(&repository), source);
        Self {
            repository,
            allocator,
        }
    }

    /// Maps `input.target_address` to a token.
    ///
    /// # Flow
    ///
    /// 1. Validate the address (`gurt://` prefix)
    /// 2. Without a slug: reuse the token of an existing link for the address, or
    ///    generate random tokens until one is free and the insert succeeds
    /// 3. With a slug: validate and reserve it, then insert; address dedup is skipped
    ///
    /// # Errors
    ///
    /// - [`ShortenError::InvalidAddress`] for empty or non-`gurt://` addresses
    /// - [`ShortenError::InvalidSlug`] for slugs outside `[A-Za-z0-9_-]+`
    /// - [`ShortenError::Conflict`] if the slug is already bound
    /// - [`ShortenError::Storage`] on storage failures
    pub async fn shorten(&self, input: ShortenInput) -> Result<ShortenOutcome, ShortenError> {
        validate_address(&input.target_address)?;

        match input.requested_slug {
            Some(slug) => self.shorten_with_slug(input.target_address, slug).await,
            None => self.shorten_anonymous(input.target_address).await,
        }
    }

    /// Resolves a token to its address and counts the access.
    ///
    /// Lookup and increment happen in one atomic repository call, so concurrent
    /// resolutions of the same token never lose an update.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotFound`] if the token is unknown; nothing is created
    /// - [`ResolveError::Storage`] on storage failures
    pub async fn resolve(&self, token: &str) -> Result<LinkView, ResolveError> {
        ensure_token_shape(token)?;

        match self.repository.increment_access_count(token).await {
            Ok(link) => {
                debug!("Resolved {} (access #{})", link.token, link.access_count);
                Ok(link.into())
            }
            Err(RepositoryError::NotFound) => Err(ResolveError::NotFound {
                token: token.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the full link record without counting an access.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn stats(&self, token: &str) -> Result<Link, ResolveError> {
        ensure_token_shape(token)?;

        self.repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| ResolveError::NotFound {
                token: token.to_string(),
            })
    }

    /// Number of links in the store.
    pub async fn link_count(&self) -> Result<i64, RepositoryError> {
        self.repository.count().await
    }

    async fn shorten_anonymous(
        &self,
        target_address: String,
    ) -> Result<ShortenOutcome, ShortenError> {
        if let Some(existing) = self.repository.find_by_address(&target_address).await? {
            debug!("Reusing token {} for {}", existing.token, target_address);
            return Ok(ShortenOutcome {
                view: existing.into(),
                created: false,
            });
        }

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let token = self.allocator.generate_token();

            if self.allocator.is_taken(&token).await? {
                debug!("Token {} already taken (attempt {}), retrying", token, attempt);
                continue;
            }

            let new_link = NewLink {
                token,
                target_address: target_address.clone(),
            };

            match self.repository.insert(new_link).await {
                Ok(link) => {
                    info!("Created link {} -> {}", link.token, link.target_address);
                    return Ok(ShortenOutcome {
                        view: link.into(),
                        created: true,
                    });
                }
                Err(RepositoryError::UniqueViolation { constraint }) => {
                    warn!(
                        "Token claimed concurrently ({}) on attempt {}, retrying",
                        constraint, attempt
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn shorten_with_slug(
        &self,
        target_address: String,
        slug: String,
    ) -> Result<ShortenOutcome, ShortenError> {
        let token = self.allocator.reserve_slug(&slug).await?;

        let new_link = NewLink {
            token,
            target_address,
        };

        match self.repository.insert(new_link).await {
            Ok(link) => {
                info!("Created link {} -> {}", link.token, link.target_address);
                Ok(ShortenOutcome {
                    view: link.into(),
                    created: true,
                })
            }
            Err(RepositoryError::UniqueViolation { .. }) => {
                debug!("Slug {} claimed concurrently", slug);
                Err(ShortenError::Conflict { slug })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Checks that `address` is non-empty, uses the `gurt://` scheme and holds
/// no NUL characters.
///
/// # Errors
///
/// Returns [`ShortenError::InvalidAddress`] otherwise.
pub fn validate_address(address: &str) -> Result<(), ShortenError> {
    if address.is_empty() {
        return Err(ShortenError::InvalidAddress {
            reason: "URL is required",
        });
    }

    if !address.starts_with(ADDRESS_PREFIX) {
        return Err(ShortenError::InvalidAddress {
            reason: "Only gurt:// URLs are supported",
        });
    }

    if address.contains('\0') {
        return Err(ShortenError::InvalidAddress {
            reason: "URL must not contain NUL characters",
        });
    }

    Ok(())
}

// Every stored token matches the slug alphabet, so anything else is unknown.
fn ensure_token_shape(token: &str) -> Result<(), ResolveError> {
    validate_slug(token).map_err(|_| ResolveError::NotFound {
        token: token.to_string(),
    })
}
