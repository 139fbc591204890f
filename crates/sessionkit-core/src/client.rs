//! Sign-in/sign-out orchestration and the session facade.
//!
//! [`AuthClient`] composes the store getters with the five actions
//! (`get_session`, `csrf_token`, `providers`, `sign_in`, `sign_out`). It is
//! stateless beyond its injected collaborators and cheap to clone.
//!
//! Every flow ends in one of two ways: a redirect away from the app, or a
//! fresh session fetch that updates the store. Nothing here writes session
//! data directly.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use serde_json::{Map, Value, json};
use tracing::debug;
use url::Url;

use sessionkit_types::{
    AuthError, AuthResult, Provider, SessionStatus, SignInOptions, SignInResult, SignOutOptions,
};

use crate::config::AuthConfig;
use crate::context::{AmbientContext, Navigator};
use crate::store::{SessionSnapshot, SessionStore};
use crate::transport::{CallOutcome, Transport};

/// Handler invoked when a required session turns out to be absent.
pub type UnauthenticatedHandler = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// Options for [`AuthClient::get_session`].
#[derive(Default)]
pub struct GetSessionOptions {
    /// Trigger the unauthenticated policy when no session exists.
    pub required: bool,
    /// Callback URL attached to the outgoing request so the service can
    /// build correct redirect links; defaults to the ambient current URL.
    pub callback_url: Option<String>,
    /// Overrides the default unauthenticated policy (a full sign-in flow).
    pub on_unauthenticated: Option<UnauthenticatedHandler>,
}

/// Terminal state of a sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The navigator was sent elsewhere; no further logic ran in this flow.
    Redirected(String),
    /// Return mode: the flow resolved in place.
    Completed(SignInResult),
}

/// Terminal state of a sign-out flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutOutcome {
    Redirected(String),
    /// The raw service payload; the session was refreshed before returning.
    Completed(Value),
}

/// Facade over the session protocol.
#[derive(Clone)]
pub struct AuthClient {
    transport: Transport,
    store: Arc<SessionStore>,
    context: Arc<dyn AmbientContext>,
    navigator: Arc<dyn Navigator>,
}

impl AuthClient {
    /// Creates a client from injected collaborators.
    ///
    /// # Errors
    /// Returns `InvalidBaseUrl` when the configured base URL does not parse.
    pub fn new(
        config: &AuthConfig,
        store: Arc<SessionStore>,
        context: Arc<dyn AmbientContext>,
        navigator: Arc<dyn Navigator>,
    ) -> AuthResult<Self> {
        let base_url = config.resolve_base_url()?;
        Ok(Self {
            transport: Transport::new(base_url),
            store,
            context,
            navigator,
        })
    }

    // --- store getters -----------------------------------------------------

    /// Current derived status.
    pub fn status(&self) -> SessionStatus {
        self.store.status()
    }

    /// Read-only projection of the current session data.
    pub fn session(&self) -> Option<Value> {
        self.store.snapshot().data
    }

    /// Timestamp of the most recent fetch attempt.
    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.store.snapshot().last_refreshed_at
    }

    /// Full read-only projection of the store.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot()
    }

    // --- actions -----------------------------------------------------------

    /// Fetches a one-time anti-forgery token, forwarding ambient cookies so
    /// the token binds to the session the browser will present.
    ///
    /// `None` on any failure; there is no internal retry — the caller
    /// decides whether the absence is fatal.
    pub async fn csrf_token(&self) -> Option<String> {
        let cookie = self.context.cookie();
        match self.transport.get("csrf", &[], cookie.as_deref()).await {
            CallOutcome::Success(payload) => payload
                .get("csrfToken")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .filter(|token| !token.is_empty()),
            CallOutcome::Failure(_) => None,
        }
    }

    /// Fetches the configured providers, keyed by id.
    ///
    /// `None` means "no providers configured" — the registry was
    /// unreachable or returned an empty configuration. Never cached;
    /// re-fetched on each sign-in attempt.
    pub async fn providers(&self) -> Option<HashMap<String, Provider>> {
        match self.transport.get("providers", &[], None).await {
            CallOutcome::Success(payload) => {
                let registry: HashMap<String, Provider> = serde_json::from_value(payload).ok()?;
                if registry.is_empty() {
                    None
                } else {
                    Some(registry)
                }
            }
            CallOutcome::Failure(_) => None,
        }
    }

    /// Fetches/refreshes the session and updates the store.
    ///
    /// Exactly one store write on success (the payload wholesale, or `None`
    /// for empty/non-object payloads). On transport failure the store keeps
    /// its prior data and status; only the loading flag is cleared.
    ///
    /// With `required`, an unauthenticated result invokes the
    /// unauthenticated policy — after the store update, so observers
    /// briefly see the true state before any redirect fires. The default
    /// policy starts a full sign-in flow carrying the callback URL.
    ///
    /// Returns the session data the store holds after the call.
    pub async fn get_session(&self, options: GetSessionOptions) -> Option<Value> {
        let callback_url = options
            .callback_url
            .unwrap_or_else(|| self.context.current_url());

        let fetched = self.refresh_session(&callback_url).await;

        if fetched && options.required && self.store.status() == SessionStatus::Unauthenticated {
            match options.on_unauthenticated {
                Some(handler) => handler().await,
                None => {
                    let sign_in_options = SignInOptions {
                        callback_url: Some(callback_url),
                        ..SignInOptions::default()
                    };
                    self.sign_in(None, sign_in_options, &[]).await;
                }
            }
        }

        self.store.snapshot().data
    }

    /// Resolves a provider, submits the sign-in request, and either
    /// redirects or (return mode) resolves in place.
    ///
    /// Never fails: configuration absence degrades into a redirect to a
    /// recovery page, and submission failures carry their error payload
    /// through the same path a success would take.
    pub async fn sign_in(
        &self,
        provider: Option<&str>,
        options: SignInOptions,
        authorization_params: &[(&str, &str)],
    ) -> SignInOutcome {
        let Some(registry) = self.providers().await else {
            let error_url = self.transport.join("error");
            return SignInOutcome::Redirected(self.navigate(error_url.as_str()));
        };

        // Resolved at the moment of the call, not at client construction.
        let redirect = options.redirect;
        let callback_url = options
            .callback_url
            .clone()
            .unwrap_or_else(|| self.context.current_url());

        let mut selection_url = self.transport.join("signin");
        selection_url
            .query_pairs_mut()
            .append_pair("callbackUrl", &callback_url);

        let Some(id) = provider else {
            return SignInOutcome::Redirected(self.navigate(selection_url.as_str()));
        };
        let Some(selected) = registry.get(id) else {
            debug!(provider = id, "provider not in registry");
            return SignInOutcome::Redirected(self.navigate(selection_url.as_str()));
        };

        // Sign-in proceeds with an empty token when the fetch fails; the
        // service-side validation decides. Sign-out is stricter.
        let csrf_token = self.csrf_token().await.unwrap_or_default();

        let mut body = match serde_json::to_value(options) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        body.insert("csrfToken".into(), Value::String(csrf_token));
        body.insert("callbackUrl".into(), Value::String(callback_url.clone()));
        body.insert("json".into(), Value::Bool(true));

        let path = format!("{}/{id}", selected.kind.action());
        let query: Vec<(&str, String)> = authorization_params
            .iter()
            .map(|(key, value)| (*key, (*value).to_string()))
            .collect();
        let payload = self
            .transport
            .post(&path, &query, &Value::Object(body))
            .await
            .into_payload();

        let url = payload
            .get("url")
            .and_then(Value::as_str)
            .map(str::to_owned);

        if redirect || !selected.kind.supports_return() {
            let href = url.unwrap_or(callback_url);
            return SignInOutcome::Redirected(self.navigate(&href));
        }

        let error = url
            .as_deref()
            .and_then(|value| Url::parse(value).ok())
            .and_then(|value| {
                value
                    .query_pairs()
                    .find(|(key, _)| key == "error")
                    .map(|(_, error)| error.into_owned())
            });

        // Store reflects the new auth state before control returns.
        self.refresh_session(&self.context.current_url()).await;

        SignInOutcome::Completed(SignInResult {
            url: if error.is_some() { None } else { url },
            error,
            status: 200,
            ok: true,
        })
    }

    /// Submits the sign-out request and either redirects or refreshes the
    /// session.
    ///
    /// # Errors
    /// Returns `CsrfUnavailable` when no CSRF token could be fetched; no
    /// network mutation is attempted in that case.
    pub async fn sign_out(&self, options: SignOutOptions) -> AuthResult<SignOutOutcome> {
        let callback_url = options
            .callback_url
            .unwrap_or_else(|| self.context.current_url());

        let Some(csrf_token) = self.csrf_token().await else {
            return Err(AuthError::csrf_unavailable());
        };

        let body = json!({
            "csrfToken": csrf_token,
            "callbackUrl": callback_url,
            // The service expects the string "true" here, unlike sign-in.
            "json": "true",
        });
        let payload = self
            .transport
            .post("signout", &[], &body)
            .await
            .into_payload();

        if options.redirect {
            let href = payload
                .get("url")
                .and_then(Value::as_str)
                .map_or(callback_url, str::to_owned);
            return Ok(SignOutOutcome::Redirected(self.navigate(&href)));
        }

        self.refresh_session(&self.context.current_url()).await;
        Ok(SignOutOutcome::Completed(payload))
    }

    // --- internals ---------------------------------------------------------

    /// One session fetch-and-store cycle. Returns whether the fetch
    /// succeeded (and therefore wrote the store).
    async fn refresh_session(&self, callback_url: &str) -> bool {
        self.store.begin_refresh();

        let cookie = self.context.cookie();
        let query = [("callbackUrl", callback_url.to_string())];
        match self.transport.get("session", &query, cookie.as_deref()).await {
            CallOutcome::Success(payload) => {
                self.store.set_session(non_empty_object(payload));
                true
            }
            CallOutcome::Failure(_) => {
                self.store.clear_loading();
                false
            }
        }
    }

    /// Issues the redirect and hands the target back for the outcome.
    fn navigate(&self, href: &str) -> String {
        debug!(url = %href, "redirecting");
        self.navigator.navigate(href);
        href.to_string()
    }
}

/// Empty or non-object payloads mean "no session".
fn non_empty_object(value: Value) -> Option<Value> {
    match value {
        Value::Object(map) if !map.is_empty() => Some(Value::Object(map)),
        _ => None,
    }
}
