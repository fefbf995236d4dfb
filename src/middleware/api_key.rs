use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::error::ApiError;
use crate::state::AppState;

/// Gate for machine clients: every `/api` request must carry the configured
/// secret in `X-API-Key`.
///
/// The response never distinguishes a missing key from a wrong one; the
/// difference shows up in log output only.
pub async fn require_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        None => {
            tracing::warn!("rejected request: missing API key");
            Err(rejected())
        }
        Some(supplied) if !key_matches(supplied, &state.config.security.api_key) => {
            tracing::warn!("rejected request: invalid API key");
            Err(rejected())
        }
        Some(_) => Ok(next.run(request).await),
    }
}

fn rejected() -> ApiError {
    ApiError::unauthorized("Invalid or missing API key")
}

/// Both sides are hashed before the comparison so the comparison itself
/// runs over fixed-length digests, in constant time.
fn key_matches(supplied: &str, expected: &str) -> bool {
    if expected.is_empty() {
        // No key configured: fail closed.
        return false;
    }

    let supplied = Sha256::digest(supplied.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    constant_time_eq(&supplied, &expected)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
