//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::ShortenInput;
use crate::error::AppError;
use crate::state::AppState;

/// Maps a gurt address to a short token.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "gurt://example.com/page", "slug": "my-link" }
/// ```
///
/// `slug` is optional. Without it, an address that was shortened before gets
/// its existing token back.
///
/// # Response
///
/// ```json
/// { "short_url": "a1b2c3" }
/// ```
///
/// - **201 Created**: a new link was stored
/// - **200 OK**: an existing link for the address was reused
///
/// # Errors
///
/// - 400 if the body is malformed, `url` is missing or not `gurt://`, or the slug is invalid
/// - 409 if the slug is already taken
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let outcome = state
        .registry
        .shorten(ShortenInput {
            target_address: payload.url,
            requested_slug: payload.slug,
        })
        .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ShortenResponse {
            short_url: outcome.view.token,
        }),
    ))
}
