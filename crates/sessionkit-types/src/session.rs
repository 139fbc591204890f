//! Session status and sign-in/sign-out option and result types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Observable authentication state, derived from the store contents.
///
/// Derivation keeps the status in lockstep with the session data: it can
/// never read `Authenticated` while the session is absent, nor
/// `Unauthenticated` while one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Unauthenticated,
    Loading,
    Authenticated,
}

impl SessionStatus {
    /// Derives the status from the loading flag and session presence.
    pub fn derive(loading: bool, has_session: bool) -> Self {
        if loading {
            SessionStatus::Loading
        } else if has_session {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Unauthenticated => write!(f, "unauthenticated"),
            SessionStatus::Loading => write!(f, "loading"),
            SessionStatus::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Options accepted by the sign-in orchestrator.
///
/// `extra` carries provider-specific submission fields (e.g. username and
/// password for a credentials provider) and is flattened into the POST body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInOptions {
    /// Destination the user is returned to after the flow completes.
    /// Defaults to the ambient current URL at the moment of the call.
    #[serde(rename = "callbackUrl", default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// When false and the provider supports return mode, resolve in place
    /// instead of redirecting.
    #[serde(default = "default_redirect")]
    pub redirect: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SignInOptions {
    fn default() -> Self {
        Self {
            callback_url: None,
            redirect: true,
            extra: Map::new(),
        }
    }
}

/// Options accepted by the sign-out orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignOutOptions {
    #[serde(rename = "callbackUrl", default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// When false, refresh the session instead of redirecting.
    #[serde(default = "default_redirect")]
    pub redirect: bool,
}

impl Default for SignOutOptions {
    fn default() -> Self {
        Self {
            callback_url: None,
            redirect: true,
        }
    }
}

fn default_redirect() -> bool {
    true
}

/// In-place resolution of a sign-in flow (return mode only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResult {
    /// Service-provided error code extracted from the response URL.
    pub error: Option<String>,
    /// Always 200; failures are carried by `error`, not by status.
    pub status: u16,
    pub ok: bool,
    /// Response URL when the submission succeeded, `None` on error.
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: status derivation keeps data and status in lockstep.
    #[test]
    fn test_status_derivation() {
        assert_eq!(SessionStatus::derive(true, true), SessionStatus::Loading);
        assert_eq!(SessionStatus::derive(true, false), SessionStatus::Loading);
        assert_eq!(
            SessionStatus::derive(false, true),
            SessionStatus::Authenticated
        );
        assert_eq!(
            SessionStatus::derive(false, false),
            SessionStatus::Unauthenticated
        );
    }

    /// Test: sign-in options default to redirecting.
    #[test]
    fn test_sign_in_options_default() {
        let options = SignInOptions::default();
        assert!(options.redirect);
        assert!(options.callback_url.is_none());
        assert!(options.extra.is_empty());
    }

    /// Test: extra submission fields are flattened into the body.
    #[test]
    fn test_sign_in_options_flatten() {
        let mut options = SignInOptions::default();
        options
            .extra
            .insert("username".into(), Value::String("jane".into()));

        let body = serde_json::to_value(&options).unwrap();
        assert_eq!(body["username"], "jane");
        assert_eq!(body["redirect"], true);
        assert!(body.get("callbackUrl").is_none());
    }
}
