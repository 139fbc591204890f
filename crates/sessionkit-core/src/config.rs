//! Client configuration.

use sessionkit_types::{AuthError, AuthResult};
use url::Url;

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "SESSIONKIT_BASE_URL";

/// Configuration for an [`crate::AuthClient`].
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Root of the remote auth service API,
    /// e.g. `http://localhost:3000/api/auth`.
    pub base_url: String,
}

impl AuthConfig {
    /// Creates a config pointing at the given API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Resolves the base URL with precedence: env > configured value.
    ///
    /// The result always carries a trailing slash so endpoint segments join
    /// as children of the API root rather than siblings.
    ///
    /// # Errors
    /// Returns `InvalidBaseUrl` when the resolved value does not parse as an
    /// absolute URL.
    pub fn resolve_base_url(&self) -> AuthResult<Url> {
        let raw = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.base_url.clone());
        let trimmed = raw.trim();

        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };

        Url::parse(&normalized).map_err(|err| AuthError::invalid_base_url(trimmed, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sessionkit_types::AuthErrorKind;

    /// Test: a trailing slash is appended so joins stay under the API root.
    #[test]
    fn test_base_url_normalization() {
        let config = AuthConfig::new("http://localhost:3000/api/auth");
        let url = config.resolve_base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/auth/");

        let already_slashed = AuthConfig::new("http://localhost:3000/api/auth/");
        assert_eq!(already_slashed.resolve_base_url().unwrap(), url);
    }

    /// Test: an unparseable base URL is a structured config error.
    #[test]
    fn test_invalid_base_url() {
        let config = AuthConfig::new("not a url");
        let err = config.resolve_base_url().unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::InvalidBaseUrl);
    }
}
