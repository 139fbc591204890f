//! HTTP pipeline against the remote auth service.
//!
//! Every call resolves to a [`CallOutcome`] rather than an `Err`: the
//! protocol treats service failures as payloads (a failed sign-in still
//! carries a redirect URL with an `error` query parameter), so callers
//! branch on the outcome explicitly instead of catching exceptions.

use serde_json::Value;
use tracing::debug;
use url::Url;

/// Result of one transport call, success and failure both carrying the
/// decoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// 2xx response; `Value::Null` when the body was empty.
    Success(Value),
    /// Non-2xx response (payload = decoded error body) or the service was
    /// unreachable (payload = `Value::Null`).
    Failure(Value),
}

impl CallOutcome {
    /// Collapses the discrimination for flows that continue uniformly on
    /// failure, substituting the error payload for the response.
    pub fn into_payload(self) -> Value {
        match self {
            CallOutcome::Success(payload) | CallOutcome::Failure(payload) => payload,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success(_))
    }
}

/// Thin JSON transport rooted at the auth service API.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
}

impl Transport {
    /// Creates a transport rooted at `base_url` (already normalized with a
    /// trailing slash by [`crate::AuthConfig::resolve_base_url`]).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Joins an endpoint segment onto the API root.
    pub fn join(&self, segment: &str) -> Url {
        // Segments are fixed endpoint names; join cannot fail for them.
        self.base_url
            .join(segment)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    /// GET an endpoint, optionally forwarding a cookie header.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
        cookie: Option<&str>,
    ) -> CallOutcome {
        let url = self.join(path);
        debug!(%url, "GET");

        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(cookie) = cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        dispatch(request).await
    }

    /// POST a JSON body to an endpoint.
    pub async fn post(&self, path: &str, query: &[(&str, String)], body: &Value) -> CallOutcome {
        let url = self.join(path);
        debug!(%url, "POST");

        let mut request = self.http.post(url).json(body);
        if !query.is_empty() {
            request = request.query(query);
        }

        dispatch(request).await
    }
}

/// Sends the request and maps the response into a [`CallOutcome`].
async fn dispatch(request: reqwest::RequestBuilder) -> CallOutcome {
    let response = match request.send().await {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, "transport error");
            return CallOutcome::Failure(Value::Null);
        }
    };

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let payload = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::Null)
    };

    if status.is_success() {
        CallOutcome::Success(payload)
    } else {
        debug!(%status, "service returned an error payload");
        CallOutcome::Failure(payload)
    }
}
