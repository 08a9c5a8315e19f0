#![allow(dead_code)]

use axum::extract::Request;
use axum::routing::{IntoMakeService, get};
use axum::{Router, ServiceExt};
use gurt_links::api;
use gurt_links::api::handlers::{health_handler, index_handler};
use gurt_links::domain::repositories::LinkRepository;
use gurt_links::infrastructure::persistence::MemoryLinkRepository;
use gurt_links::routes::app_router;
use gurt_links::state::AppState;
use gurt_links::utils::token::{SeededTokenSource, TokenSource};
use std::sync::{Arc, Mutex};
use tower_http::normalize_path::NormalizePath;

/// Cycles through a fixed set of tokens forever.
pub struct CyclingTokens {
    tokens: Vec<&'static str>,
    next: Mutex<usize>,
}

impl CyclingTokens {
    pub fn new(tokens: &[&'static str]) -> Self {
        Self {
            tokens: tokens.to_vec(),
            next: Mutex::new(0),
        }
    }
}

impl TokenSource for CyclingTokens {
    fn next_token(&self) -> String {
        let mut next = self.next.lock().unwrap();
        let token = self.tokens[*next % self.tokens.len()];
        *next += 1;
        token.to_string()
    }
}

pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let state = AppState::with_token_source(
        repository.clone() as Arc<dyn LinkRepository>,
        Arc::new(SeededTokenSource::new(2024)),
    );

    (state, repository)
}

pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::routes())
        .with_state(state)
}

/// The production router, with tracing and trailing-slash normalization.
pub fn create_routed_app(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_router(state))
}

pub fn is_generated_token(token: &str) -> bool {
    token.len() == 6
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
