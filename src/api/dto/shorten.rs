//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a gurt address.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Target address; must use the `gurt://` scheme.
    #[serde(default)]
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,

    /// Optional custom token.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Token assigned to the address.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}
