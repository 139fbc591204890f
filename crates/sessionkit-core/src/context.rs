//! Ambient request context and the navigation primitive.
//!
//! In a server-rendered setting the coordinator must forward the caller's
//! cookies (so CSRF tokens bind to the session the browser will present)
//! and derive URLs from the incoming request; in a browser-like setting
//! there is nothing to forward. The capability lives in an explicit context
//! object passed through the call chain, never detected from globals, and
//! is read fresh at the start of every CSRF/session fetch so concurrent
//! requests from different logical sessions stay isolated.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// Per-call ambient capabilities.
pub trait AmbientContext: Send + Sync {
    /// Cookie header to forward to the auth service, when one exists.
    fn cookie(&self) -> Option<String>;

    /// URL of the current page/request, used to default callback URLs.
    fn current_url(&self) -> String;
}

/// Fixed context: a known current URL and optional forwarded cookies.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    cookie: Option<String>,
    current_url: String,
}

impl StaticContext {
    /// Browser-like context: a current URL and no forwarded headers.
    pub fn new(current_url: impl Into<String>) -> Self {
        Self {
            cookie: None,
            current_url: current_url.into(),
        }
    }

    /// Attaches a cookie header, as a server-rendered context would.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }
}

impl AmbientContext for StaticContext {
    fn cookie(&self) -> Option<String> {
        self.cookie.clone()
    }

    fn current_url(&self) -> String {
        self.current_url.clone()
    }
}

/// Issues the redirects the orchestrators decide on.
///
/// Navigation is the final observable action of a redirecting flow; the
/// orchestrator returns immediately after calling this.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Records navigations instead of performing them.
///
/// Useful wherever there is no real browser to redirect: the host
/// application inspects the recorded target and acts on it.
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    visited: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs navigated to, in order.
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent navigation target.
    pub fn last(&self) -> Option<String> {
        self.visited().last().cloned()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&self, url: &str) {
        debug!(%url, "navigation recorded");
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
    }
}
