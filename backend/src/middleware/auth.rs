//! Authentication middleware
//!
//! HTTP Basic gate in front of the API. Credentials are supplied through
//! configuration and checked via a pluggable verifier, so deployments can
//! swap in their own credential source without touching the routes.

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::AppError;
use crate::AppState;

/// Checks a username/password pair against some credential source.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Verifier backed by the configured credential pair.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Parses a `Basic <base64>` Authorization header into its credential pair.
pub fn parse_basic_credentials(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Middleware enforcing the Basic gate on protected routes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let rejection = match header.and_then(parse_basic_credentials) {
        Some((username, password)) if state.verifier.verify(&username, &password) => {
            return next.run(request).await;
        }
        Some(_) => AppError::InvalidCredentials,
        None => AppError::Unauthorized("Missing or invalid Authorization header".to_string()),
    };

    challenge_response(rejection)
}

/// Renders a rejection through the shared error taxonomy and attaches the
/// Basic challenge header.
fn challenge_response(error: AppError) -> Response {
    let mut response = error.into_response();
    response.headers_mut().insert(
        WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"crl\""),
    );
    response
}
