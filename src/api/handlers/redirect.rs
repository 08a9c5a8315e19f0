//! Handler for token resolution.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::redirect::RedirectResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a token to its gurt address and counts the access.
///
/// # Endpoint
///
/// `GET /api/redirect/{short_url}`
///
/// The gateway in front of this service performs the actual redirect; this
/// endpoint only reports the destination.
///
/// # Response
///
/// ```json
/// { "url": "gurt://example.com/page" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown.
pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RedirectResponse>, AppError> {
    let view = state.registry.resolve(&short_url).await?;

    Ok(Json(RedirectResponse {
        url: view.target_address,
    }))
}
