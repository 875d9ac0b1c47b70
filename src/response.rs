//! Captured response state and body accessors.
//!
//! This module contains the [`Response`] struct storing the outcome of a
//! dispatch. Successful and HTTP-error outcomes are represented uniformly;
//! the body is drained from the transport lazily and memoized.
//!
//! # Examples
//!
//! ```rust,no_run
//! use repartee::{Error, Http};
//!
//! # async fn example() -> Result<(), Error> {
//! let mut http = Http::new();
//! http.get("https://api.example.com/users/1", &[("expand", "profile")])
//!     .await?;
//!
//! if http.successful()? {
//!     println!("name: {:?}", http.value("name").await?);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};

use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::fmt;
use std::mem;

/// Body cache states. `Empty` is recorded distinctly from `Pending` so an
/// empty body is never re-read from the transport.
enum Body {
    Pending(reqwest::Response),
    Empty,
    Text(String),
}

/// A captured response, success or HTTP-error outcome alike.
pub struct Response {
    status: StatusCode,
    body: Body,
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match self.body {
            Body::Pending(_) => "pending",
            Body::Empty => "empty",
            Body::Text(_) => "text",
        };
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("body", &body)
            .finish()
    }
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self {
            status: inner.status(),
            body: Body::Pending(inner),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check whether the status is exactly 200 OK.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Check whether the status is a success (2xx).
    pub fn successful(&self) -> bool {
        self.status.is_success()
    }

    /// Check whether the status is a client error (4xx).
    pub fn client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Check whether the status is a server error (5xx).
    pub fn server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Get the response body text.
    ///
    /// The body stream is drained at most once; subsequent calls return the
    /// memoized text. An empty body is reported as `None`.
    pub async fn body(&mut self) -> Result<Option<&str>> {
        if matches!(self.body, Body::Pending(_)) {
            match mem::replace(&mut self.body, Body::Empty) {
                Body::Pending(inner) => {
                    // If the read fails the stream is already consumed, so
                    // the body stays recorded as empty.
                    let text = inner.text().await?;
                    if !text.is_empty() {
                        self.body = Body::Text(text);
                    }
                }
                state => self.body = state,
            }
        }

        match &self.body {
            Body::Text(text) => Ok(Some(text)),
            _ => Ok(None),
        }
    }

    /// Decode the body as JSON.
    ///
    /// Returns `None` when the body is absent or empty. A present but
    /// malformed body is an [`Error::Decode`], so "no body" and "bad body"
    /// stay distinguishable.
    pub async fn json(&mut self) -> Result<Option<Value>> {
        match self.body().await? {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    /// Decode the body as JSON, falling back to an empty mapping.
    ///
    /// Absent and unparsable bodies both yield `Value::Object({})`; only
    /// transport read failures propagate.
    pub async fn to_value(&mut self) -> Result<Value> {
        match self.json().await {
            Ok(Some(value)) => Ok(value),
            Ok(None) | Err(Error::Decode { .. }) => Ok(Value::Object(Map::new())),
            Err(e) => Err(e),
        }
    }

    /// Re-serialize [`to_value`](Self::to_value) to a JSON string.
    pub async fn to_json(&mut self) -> Result<String> {
        let value = self.to_value().await?;
        Ok(serde_json::to_string(&value)?)
    }

    /// Look up a top-level field of the decoded body.
    ///
    /// The lookup runs against a fresh parse of the memoized body text, so
    /// it reflects the current response even after other accessors ran.
    /// Missing keys and non-object bodies are `None`, not errors.
    pub async fn value(&mut self, key: &str) -> Result<Option<Value>> {
        Ok(self.to_value().await?.get(key).cloned())
    }

    /// Look up a top-level field, falling back to a default.
    pub async fn value_or(&mut self, key: &str, default: Value) -> Result<Value> {
        Ok(self.value(key).await?.unwrap_or(default))
    }

    /// Check whether the decoded body contains a top-level field.
    pub async fn has(&mut self, key: &str) -> Result<bool> {
        Ok(self.to_value().await?.get(key).is_some())
    }
}

// Note: Response accessors require a live transport response, so their tests
// live in tests/dispatch_tests.rs using mockito.
