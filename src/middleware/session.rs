use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session_token";

/// Authenticated user context extracted from a verified session token,
/// injected into request extensions for downstream handlers.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: String,
    pub roles: Vec<String>,
}

/// Gate for end users: a signed session token from the session cookie or,
/// failing that, an `Authorization: Bearer` header. Any verification
/// failure rejects with 401.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    let claims = auth::verify_token(&token, &state.config.security.jwt_secret)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    request
        .extensions_mut()
        .insert(AuthUser { user_id: claims.sub, roles: claims.roles });

    Ok(next.run(request).await)
}

/// Cookie takes precedence over the Authorization header.
fn session_token(headers: &HeaderMap) -> Option<String> {
    cookie_token(headers).or_else(|| bearer_token(headers))
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
