//! Authentication provider metadata.
//!
//! The registry endpoint returns a mapping of provider id to metadata. The
//! provider `type` drives flow branching: `credentials` and `email` support
//! a non-redirecting "return" mode, and `credentials` submits against the
//! `callback/{id}` endpoint instead of `signin/{id}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider category reported by the auth service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Username/password style sign-in handled by the service.
    Credentials,
    /// Magic-link email sign-in.
    Email,
    /// OAuth/OIDC sign-in via an external identity provider.
    OAuth,
    /// Anything the service exposes that this client has no special
    /// handling for; always redirect-based.
    #[default]
    #[serde(other)]
    Other,
}

impl ProviderType {
    /// Whether the sign-in flow can resolve in place instead of redirecting.
    pub fn supports_return(self) -> bool {
        matches!(self, ProviderType::Credentials | ProviderType::Email)
    }

    /// Path segment the sign-in submission posts to.
    pub fn action(self) -> &'static str {
        match self {
            ProviderType::Credentials => "callback",
            _ => "signin",
        }
    }
}

/// A configured authentication method, immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProviderType,
    #[serde(rename = "signinUrl", default, skip_serializing_if = "Option::is_none")]
    pub sign_in_url: Option<String>,
    #[serde(rename = "callbackUrl", default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Provider-specific sign-in metadata the service attaches.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
