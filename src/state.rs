//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkRegistry;
use crate::domain::repositories::LinkRepository;
use crate::utils::token::{OsTokenSource, TokenSource};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LinkRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<LinkRegistry>) -> Self {
        Self { registry }
    }

    /// Builds state over `repository` with OS-random tokens.
    pub fn from_repository(repository: Arc<dyn LinkRepository>) -> Self {
        Self::with_token_source(repository, Arc::new(OsTokenSource))
    }

    pub fn with_token_source(
        repository: Arc<dyn LinkRepository>,
        source: Arc<dyn TokenSource>,
    ) -> Self {
        Self::new(Arc::new(LinkRegistry::new(repository, source)))
    }
}
