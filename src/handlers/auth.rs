//! Registration, login, and logout.
//!
//! These handlers talk to the user collection directly: user accounts are
//! not a catalog resource and have no public CRUD surface.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::future::Future;
use uuid::Uuid;

use super::decode_body;
use crate::auth::{self, Claims};
use crate::database::StoreError;
use crate::error::ApiError;
use crate::middleware::{AuthUser, SESSION_COOKIE};
use crate::models::user::{
    LoginRequest, RegisterRequest, User, LOGIN_RULES, REGISTER_RULES, USERS_COLLECTION,
};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req: RegisterRequest = decode_body(payload, REGISTER_RULES)?;

    // Fast-path duplicate check. The unique indexes on the collection are
    // the source of truth; a concurrent insert still surfaces as Duplicate
    // below.
    let email_taken =
        bounded(&state, state.store.find_one(USERS_COLLECTION, "email", &req.email))
            .await?
            .is_some();
    let username_taken =
        bounded(&state, state.store.find_one(USERS_COLLECTION, "username", &req.username))
            .await?
            .is_some();
    if email_taken || username_taken {
        return Err(duplicate_account());
    }

    let hashed = auth::hash_password(&req.password).map_err(|e| {
        tracing::error!("password hashing error: {}", e);
        ApiError::internal_server_error("Internal server error")
    })?;

    let id = Uuid::new_v4();
    let now = Utc::now();
    let doc = json!({
        "id": id,
        "username": req.username,
        "email": req.email,
        "password": hashed,
        "createdAt": now,
        "updatedAt": now,
    });

    let stored = match bounded_raw(&state, state.store.insert(USERS_COLLECTION, id, doc)).await? {
        Ok(stored) => stored,
        Err(StoreError::Duplicate(_)) => return Err(duplicate_account()),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %id, "registered new user");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "username": stored["username"],
            "email": stored["email"],
        })),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req: LoginRequest = decode_body(payload, LOGIN_RULES)?;

    let doc = bounded(&state, state.store.find_one(USERS_COLLECTION, "email", &req.email))
        .await?
        .ok_or_else(invalid_credentials)?;

    let user: User = serde_json::from_value(doc).map_err(|e| {
        tracing::error!("stored user document is malformed: {}", e);
        ApiError::internal_server_error("Internal server error")
    })?;

    let password_ok = auth::verify_password(&req.password, &user.password).map_err(|e| {
        tracing::error!("password verification error: {}", e);
        ApiError::internal_server_error("Internal server error")
    })?;
    if !password_ok {
        return Err(invalid_credentials());
    }

    let expiry_hours = state.config.security.jwt_expiry_hours;
    let claims = Claims::new(user.id.to_string(), vec!["user".to_string()], expiry_hours);
    let token = auth::issue_token(&claims, &state.config.security.jwt_secret).map_err(|e| {
        tracing::error!("token generation error: {}", e);
        ApiError::internal_server_error("Internal server error")
    })?;

    tracing::info!(user_id = %user.id, "user logged in");

    let cookie =
        session_cookie(&token, (expiry_hours * 3600) as i64, state.config.secure_cookies());
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(json!({
            "user": {
                "id": user.id,
                "username": user.username,
                "email": user.email,
            }
        })),
    ))
}

/// POST /auth/logout — requires a valid session; clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    tracing::info!(user_id = %user.user_id, "user logged out");

    let cookie = session_cookie("", 0, state.config.secure_cookies());
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(json!({ "message": "Successfully logged out" })),
    )
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid credentials")
}

fn duplicate_account() -> ApiError {
    ApiError::conflict("Email or username already exists")
}

/// HTTP-only session cookie; Secure outside development.
fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Bound the wait on a store call and surface failures generically.
async fn bounded<T>(
    state: &AppState,
    op: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, ApiError> {
    Ok(bounded_raw(state, op).await??)
}

/// Like [`bounded`], but leaves store errors to the caller.
async fn bounded_raw<T>(
    state: &AppState,
    op: impl Future<Output = Result<T, StoreError>>,
) -> Result<Result<T, StoreError>, ApiError> {
    tokio::time::timeout(state.request_timeout(), op).await.map_err(|_| {
        tracing::error!("store operation timed out");
        ApiError::internal_server_error("Internal server error")
    })
}
