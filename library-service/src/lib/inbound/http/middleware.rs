use std::sync::Arc;

use auth::Authenticator;
use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::domain::account::models::AccountId;
use crate::i18n::MessageKey;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::locale::Locale;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated account in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub expires_at: DateTime<Utc>,
}

/// Why the gate refused a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateRejection {
    #[error("Missing bearer credential")]
    MissingCredential,

    #[error("Invalid bearer token: {0}")]
    Unauthorized(#[from] JwtError),
}

/// Decide whether a request may pass, given its headers and the current instant.
///
/// # Errors
/// * `MissingCredential` - No `Authorization: Bearer <token>` header, or an empty token
/// * `Unauthorized` - Token is malformed, has a bad signature or is expired
pub fn admit(
    authenticator: &Authenticator,
    headers: &HeaderMap,
    now: DateTime<Utc>,
) -> Result<AuthenticatedAccount, GateRejection> {
    let token = bearer_token(headers).ok_or(GateRejection::MissingCredential)?;
    let verified = authenticator.validate_token_at(token, now)?;

    Ok(AuthenticatedAccount {
        account_id: AccountId::new(verified.identity),
        expires_at: verified.expires_at,
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();

    (!token.is_empty()).then_some(token)
}

/// Middleware that admits requests carrying a valid bearer token and attaches
/// the `AuthenticatedAccount` to request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let account = admit(&state.authenticator, req.headers(), Utc::now()).map_err(|rejection| {
        tracing::warn!(reason = %rejection, uri = %req.uri(), "Request rejected by auth gate");
        Locale::negotiate(req.headers(), req.uri(), Arc::clone(&state.catalog))
            .respond::<()>(Err(ApiError::Unauthorized(MessageKey::ErrorUnauthorized)))
    })?;

    req.extensions_mut().insert(account);

    Ok(next.run(req).await)
}
