//! In-process link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::LinkRepository;

/// A repository that keeps links in memory.
///
/// All state sits behind one async mutex, so the token check and the write
/// of an insert, and the read and write of an increment, are atomic with
/// respect to every other caller sharing this instance. Links do not survive
/// a restart.
///
/// # Use Cases
///
/// - Development without PostgreSQL
/// - Handler and concurrency tests
#[derive(Default)]
pub struct MemoryLinkRepository {
    store: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    last_id: i64,
    by_token: HashMap<String, Link>,
    /// Token of the oldest link for each address.
    by_address: HashMap<String, String>,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory link storage");
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn find_by_address(&self, address: &str) -> Result<Option<Link>, RepositoryError> {
        let store = self.store.lock().await;

        Ok(store
            .by_address
            .get(address)
            .and_then(|token| store.by_token.get(token))
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.by_token.get(token).cloned())
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        let mut store = self.store.lock().await;

        if store.by_token.contains_key(&new_link.token) {
            return Err(RepositoryError::token_taken());
        }

        store.last_id += 1;
        let now = Utc::now();
        let link = Link::new(
            store.last_id,
            new_link.token,
            new_link.target_address,
            0,
            now,
            now,
        );

        store
            .by_address
            .entry(link.target_address.clone())
            .or_insert_with(|| link.token.clone());
        store.by_token.insert(link.token.clone(), link.clone());

        Ok(link)
    }

    async fn increment_access_count(&self, token: &str) -> Result<Link, RepositoryError> {
        let mut store = self.store.lock().await;

        let link = store
            .by_token
            .get_mut(token)
            .ok_or(RepositoryError::NotFound)?;
        link.access_count += 1;
        link.updated_at = Utc::now();

        Ok(link.clone())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.by_token.len() as i64)
    }
}
