//! Structured errors for the session coordinator.
//!
//! Most protocol failures are data, not errors: a failed sign-in degrades
//! into a redirect or a result object carrying an `error` field. The cases
//! below are the ones that do surface as `Err` to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categories of coordinator errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    /// No CSRF token could be obtained before a mutating request.
    CsrfUnavailable,
    /// The configured auth service base URL does not parse.
    InvalidBaseUrl,
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthErrorKind::CsrfUnavailable => write!(f, "csrf_unavailable"),
            AuthErrorKind::InvalidBaseUrl => write!(f, "invalid_base_url"),
        }
    }
}

/// Structured error with kind and optional details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthError {
    /// Error category
    pub kind: AuthErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., the offending value)
    pub details: Option<String>,
}

impl AuthError {
    /// Creates a new error.
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates the sign-out CSRF failure.
    pub fn csrf_unavailable() -> Self {
        Self::new(
            AuthErrorKind::CsrfUnavailable,
            "Could not fetch CSRF token for signing out",
        )
    }

    /// Creates a base URL validation failure.
    pub fn invalid_base_url(url: &str, details: impl Into<String>) -> Self {
        Self {
            kind: AuthErrorKind::InvalidBaseUrl,
            message: format!("Invalid auth base URL: {url}"),
            details: Some(details.into()),
        }
    }

    /// HTTP status code the error maps to.
    pub fn status(&self) -> u16 {
        match self.kind {
            AuthErrorKind::CsrfUnavailable => 400,
            AuthErrorKind::InvalidBaseUrl => 500,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

/// Result type for coordinator operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;
