//! Shared wiremock harness for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use sessionkit_core::{
    AuthClient, AuthConfig, MemoryNavigator, Navigator, SessionStore, StaticContext,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Current URL of the imaginary page driving the flows.
pub const APP_URL: &str = "http://app.local/dashboard";

pub struct Harness {
    pub server: MockServer,
    pub client: AuthClient,
    pub store: Arc<SessionStore>,
    pub navigator: Arc<MemoryNavigator>,
}

impl Harness {
    /// Absolute URL of an auth endpoint on the mock server.
    pub fn api(&self, segment: &str) -> String {
        format!("{}/api/auth/{segment}", self.server.uri())
    }
}

/// Harness with a browser-like context (no forwarded cookies).
pub async fn harness() -> Harness {
    harness_with_context(StaticContext::new(APP_URL)).await
}

/// Harness with forwarded request cookies (server-rendered context).
pub async fn harness_with_cookie(cookie: &str) -> Harness {
    harness_with_context(StaticContext::new(APP_URL).with_cookie(cookie)).await
}

async fn harness_with_context(context: StaticContext) -> Harness {
    let server = MockServer::start().await;
    let store = Arc::new(SessionStore::new());
    let navigator = Arc::new(MemoryNavigator::new());
    let config = AuthConfig::new(format!("{}/api/auth", server.uri()));

    let client = AuthClient::new(
        &config,
        Arc::clone(&store),
        Arc::new(context),
        Arc::clone(&navigator) as Arc<dyn Navigator>,
    )
    .unwrap();

    Harness {
        server,
        client,
        store,
        navigator,
    }
}

pub fn ok_json(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub async fn mount_csrf(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/api/auth/csrf"))
        .respond_with(ok_json(json!({ "csrfToken": token })))
        .mount(server)
        .await;
}

pub async fn mount_providers(server: &MockServer, registry: Value) {
    Mock::given(method("GET"))
        .and(path("/api/auth/providers"))
        .respond_with(ok_json(registry))
        .mount(server)
        .await;
}

pub async fn mount_session(server: &MockServer, session: Value) {
    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ok_json(session))
        .mount(server)
        .await;
}

/// Registry with a single credentials provider.
pub fn credentials_registry() -> Value {
    json!({
        "credentials": { "id": "credentials", "name": "Credentials", "type": "credentials" }
    })
}

/// Registry with a single OAuth provider.
pub fn oauth_registry() -> Value {
    json!({
        "github": { "id": "github", "name": "GitHub", "type": "oauth" }
    })
}
