//! DTOs for the redirect lookup endpoint.

use serde::Serialize;

/// Target address of a resolved token.
#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub url: String,
}
