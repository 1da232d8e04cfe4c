//! Server-side admin gate.
//!
//! Mutating routes take a [`RequireAdmin`] argument; the extractor reads an
//! `Authorization: Bearer <secret>` header and checks it against the
//! configured [`AdminGuard`]. Secrets are trimmed on both sides before
//! comparison, so the session check and the bearer check agree.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use sha2::{Digest, Sha256};
use shelf_http::error::AppError;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Message shown when a presented secret does not match.
pub const INCORRECT_PASSWORD: &str = "Incorrect password. Please try again.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthzError {
    #[error("missing admin credentials")]
    MissingCredentials,
    #[error("{}", INCORRECT_PASSWORD)]
    InvalidCredentials,
}

impl From<AuthzError> for AppError {
    fn from(err: AuthzError) -> Self {
        AppError::unauthorized(err.to_string())
    }
}

/// Checks presented admin secrets against the configured one.
///
/// A guard built without a secret lets every request through.
#[derive(Clone, Debug, Default)]
pub struct AdminGuard {
    secret_digest: Option<[u8; 32]>,
}

/// SHA-256 of the trimmed secret, compared in constant time.
fn digest(secret: &str) -> [u8; 32] {
    Sha256::digest(secret.trim().as_bytes()).into()
}

impl AdminGuard {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret_digest: secret
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(digest),
        }
    }

    /// Guard that accepts any request
    pub fn open() -> Self {
        Self {
            secret_digest: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.secret_digest.is_none()
    }

    pub fn verify(&self, presented: Option<&str>) -> Result<(), AuthzError> {
        let Some(expected) = self.secret_digest.as_ref() else {
            return Ok(());
        };

        let candidate = presented.ok_or(AuthzError::MissingCredentials)?;
        if bool::from(digest(candidate)[..].ct_eq(&expected[..])) {
            Ok(())
        } else {
            Err(AuthzError::InvalidCredentials)
        }
    }
}

/// Extract the bearer token from an `Authorization` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Proof that the request carried valid admin credentials.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    AdminGuard: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let guard = AdminGuard::from_ref(state);

        guard.verify(bearer_token(&parts.headers)).map_err(|err| {
            tracing::warn!(
                target: "shelf-authz",
                method = %parts.method,
                path = %parts.uri.path(),
                reason = %err,
                "admin request rejected"
            );
            AppError::from(err)
        })?;

        Ok(RequireAdmin)
    }
}
