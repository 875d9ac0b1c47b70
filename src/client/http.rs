//! The fluent HTTP facade.
//!
//! This module contains the [`Http`] struct combining the configuration
//! builder, the dispatcher, and the precondition-checked response accessors.
//! Configuration accumulates through chained consuming calls, a dispatch
//! method performs one exchange, and the accessors read the captured
//! response.
//!
//! # Examples
//!
//! ## Configure, dispatch, inspect
//!
//! ```rust,no_run
//! use repartee::{Error, Http};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Error> {
//! let mut http = Http::create("https://api.example.com")
//!     .bearer("secret-token")
//!     .timeout(Duration::from_secs(5));
//!
//! http.get("/users", &[("page", "1")]).await?;
//!
//! if http.successful()? {
//!     println!("{}", http.to_json().await?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error statuses are captured, not raised
//!
//! ```rust,no_run
//! # use repartee::{Error, Http};
//! # async fn example() -> Result<(), Error> {
//! let mut http = Http::new();
//! http.delete("https://api.example.com/users/42").await?;
//!
//! // A 404 lands here, not in the Err branch above.
//! if !http.successful()? {
//!     eprintln!("delete failed with {}", http.status()?);
//! }
//! # Ok(())
//! # }
//! ```

use super::options::{BodyMode, Options};
use crate::conditional::Conditional;
use crate::error::{Error, Result};
use crate::response::Response;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A fluent facade over one HTTP request/response cycle.
///
/// Each instance owns one option set and at most one captured response.
/// Dispatching again replaces the captured response, so cached body state
/// never leaks between requests.
///
/// ```rust
/// use repartee::Http;
///
/// let http = Http::new().accept_json().without_verify();
/// ```
pub struct Http {
    options: Options,
    response: Option<Response>,
}

impl fmt::Debug for Http {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Http")
            .field("options", &self.options)
            .field("response", &self.response)
            .finish()
    }
}

impl Default for Http {
    fn default() -> Self {
        Self::new()
    }
}

impl Conditional for Http {}

impl Http {
    /// Creates an instance with the default options.
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            response: None,
        }
    }

    /// Creates an instance with a base URL for relative requests.
    pub fn create(base_url: impl Into<String>) -> Self {
        Self::new().base_url(Some(base_url))
    }

    /// Gets the current option set.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Gets the captured response, if any dispatch has completed.
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Builds a `reqwest::Client` from the current option set.
    ///
    /// Escape hatch for callers that want to drive reqwest directly with
    /// this instance's configuration.
    pub fn client(&self) -> Result<reqwest::Client> {
        self.options.build_client()
    }

    // === Configuration builder ===

    /// Sets or clears the base URL. `None` disables URL prefixing.
    pub fn base_url<S: Into<String>>(mut self, url: Option<S>) -> Self {
        self.options.base_url = url.map(Into::into);
        self
    }

    /// Registers a transport configuration tweak.
    ///
    /// The closure runs against the `reqwest::ClientBuilder` each time a
    /// client is built, after the dedicated options are applied. Use it for
    /// transport options without a dedicated mutator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use repartee::Http;
    ///
    /// let http = Http::new().configure(|builder| builder.user_agent("repartee-demo/1.0"));
    /// ```
    pub fn configure<F>(mut self, tweak: F) -> Self
    where
        F: Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync + 'static,
    {
        self.options.tweaks.push(Arc::new(Box::new(tweak)));
        self
    }

    /// Enables or disables verbose request tracing.
    ///
    /// Dispatches emit `tracing` debug events and the connection is built
    /// with verbose logging. Disabled by default.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.options.debug = enabled;
        self
    }

    /// Switches request payloads to form encoding.
    ///
    /// See also [`as_json()`] to switch back.
    ///
    /// [`as_json()`]: Http::as_json
    pub fn as_form(mut self) -> Self {
        self.options.body_mode = BodyMode::Form;
        self
    }

    /// Switches request payloads to JSON encoding. This is the default.
    pub fn as_json(mut self) -> Self {
        self.options.body_mode = BodyMode::Json;
        self
    }

    /// Disables TLS certificate verification.
    pub fn without_verify(mut self) -> Self {
        self.options.verify = false;
        self
    }

    /// Merges a set of headers into the existing ones.
    ///
    /// Later calls override same-named keys (header names are
    /// case-insensitive); non-conflicting keys from both sides survive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use repartee::Http;
    ///
    /// let http = Http::new().headers([
    ///     ("x-client", "repartee"),
    ///     ("x-request-id", "0451"),
    /// ]);
    /// ```
    ///
    /// See also [`header()`] for setting a single header.
    ///
    /// [`header()`]: Http::header
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in headers {
            self.options.set_header(key.as_ref(), value);
        }
        self
    }

    /// Sets a bearer-token Authorization header.
    ///
    /// `bearer("abc")` writes the header value `Bearer abc`.
    pub fn bearer(self, token: impl AsRef<str>) -> Self {
        self.authorization(format!("Bearer {}", token.as_ref()))
    }

    /// Sets a raw Authorization header value.
    pub fn authorization(self, value: impl Into<String>) -> Self {
        self.header("authorization", value)
    }

    /// Forces the Accept header to `application/json`.
    pub fn accept_json(self) -> Self {
        self.header("accept", "application/json")
    }

    /// Forces the Content-Type header to `application/json`.
    pub fn content_type_json(self) -> Self {
        self.header("content-type", "application/json")
    }

    /// Sets a single header, overriding any prior value for that key.
    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.options.set_header(key, value);
        self
    }

    /// Sets the per-request timeout. Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Sets the redirect limit. Zero disables redirect following.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.options.max_redirects = max;
        self
    }

    // === Dispatcher ===

    /// Issues a GET request with query parameters.
    ///
    /// `query` is serialized into the query string; pass an empty slice for
    /// none. HTTP error statuses are captured, not raised — see
    /// [`status()`](Http::status) and friends.
    pub async fn get<Q>(&mut self, url: &str, query: &Q) -> Result<&mut Self>
    where
        Q: Serialize + ?Sized,
    {
        self.fetch(Method::GET, url, query).await
    }

    /// Issues a HEAD request with query parameters.
    pub async fn head<Q>(&mut self, url: &str, query: &Q) -> Result<&mut Self>
    where
        Q: Serialize + ?Sized,
    {
        self.fetch(Method::HEAD, url, query).await
    }

    /// Issues a POST request carrying `data` in the active body encoding.
    pub async fn post<B>(&mut self, url: &str, data: &B) -> Result<&mut Self>
    where
        B: Serialize + ?Sized,
    {
        self.send_with_body(Method::POST, url, data).await
    }

    /// Issues a PUT request carrying `data` in the active body encoding.
    pub async fn put<B>(&mut self, url: &str, data: &B) -> Result<&mut Self>
    where
        B: Serialize + ?Sized,
    {
        self.send_with_body(Method::PUT, url, data).await
    }

    /// Issues a PATCH request carrying `data` in the active body encoding.
    pub async fn patch<B>(&mut self, url: &str, data: &B) -> Result<&mut Self>
    where
        B: Serialize + ?Sized,
    {
        self.send_with_body(Method::PATCH, url, data).await
    }

    /// Issues a DELETE request with no body.
    pub async fn delete(&mut self, url: &str) -> Result<&mut Self> {
        let request = self.prepare(Method::DELETE, url)?;
        self.capture(request).await
    }

    /// Issues a request with an arbitrary verb and no body.
    ///
    /// Passthrough for verbs without a dedicated wrapper, such as OPTIONS
    /// or TRACE. The capture policy is the same as for the wrappers.
    pub async fn request(&mut self, method: Method, url: &str) -> Result<&mut Self> {
        let request = self.prepare(method, url)?;
        self.capture(request).await
    }

    async fn fetch<Q>(&mut self, method: Method, url: &str, query: &Q) -> Result<&mut Self>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.prepare(method, url)?.query(query);
        self.capture(request).await
    }

    async fn send_with_body<B>(&mut self, method: Method, url: &str, data: &B) -> Result<&mut Self>
    where
        B: Serialize + ?Sized,
    {
        let request = self.prepare(method, url)?;
        let request = match self.options.body_mode {
            BodyMode::Json => request.json(data),
            BodyMode::Form => request.form(data),
        };
        self.capture(request).await
    }

    fn prepare(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let client = self.options.build_client()?;
        let url = self.options.resolve_url(url)?;
        if self.options.debug {
            debug!(%method, %url, "dispatching request");
        }
        Ok(client.request(method, url))
    }

    /// Sends the request and stores the outcome.
    ///
    /// reqwest does not turn HTTP error statuses into errors, so 4xx/5xx
    /// land in the captured response like any other status. Only transport
    /// failures propagate.
    async fn capture(&mut self, request: RequestBuilder) -> Result<&mut Self> {
        // Drop the previous response first so a failed dispatch never
        // leaves stale accessor state behind.
        self.response = None;
        let response = request.send().await?;
        if self.options.debug {
            debug!(status = %response.status(), "captured response");
        }
        self.response = Some(Response::new(response));
        Ok(self)
    }

    // === Response accessors ===

    fn captured(&self) -> Result<&Response> {
        self.response.as_ref().ok_or(Error::NoResponse)
    }

    fn captured_mut(&mut self) -> Result<&mut Response> {
        self.response.as_mut().ok_or(Error::NoResponse)
    }

    /// Gets the status code of the captured response.
    ///
    /// Fails with [`Error::NoResponse`] before the first dispatch, as do
    /// all accessors below.
    pub fn status(&self) -> Result<StatusCode> {
        Ok(self.captured()?.status())
    }

    /// Whether the status is exactly 200 OK.
    pub fn is_ok(&self) -> Result<bool> {
        Ok(self.captured()?.is_ok())
    }

    /// Whether the status is a success (2xx).
    pub fn successful(&self) -> Result<bool> {
        Ok(self.captured()?.successful())
    }

    /// Whether the status is a client error (4xx).
    pub fn client_error(&self) -> Result<bool> {
        Ok(self.captured()?.client_error())
    }

    /// Whether the status is a server error (5xx).
    pub fn server_error(&self) -> Result<bool> {
        Ok(self.captured()?.server_error())
    }

    /// Gets the response body text, memoized after the first read.
    pub async fn body(&mut self) -> Result<Option<&str>> {
        self.captured_mut()?.body().await
    }

    /// Decodes the response body as JSON.
    pub async fn json(&mut self) -> Result<Option<Value>> {
        self.captured_mut()?.json().await
    }

    /// Decodes the response body, falling back to an empty mapping.
    pub async fn to_value(&mut self) -> Result<Value> {
        self.captured_mut()?.to_value().await
    }

    /// Re-serializes the decoded body to a JSON string.
    pub async fn to_json(&mut self) -> Result<String> {
        self.captured_mut()?.to_json().await
    }

    /// Looks up a top-level field of the decoded body.
    pub async fn value(&mut self, key: &str) -> Result<Option<Value>> {
        self.captured_mut()?.value(key).await
    }

    /// Looks up a top-level field, falling back to a default.
    pub async fn value_or(&mut self, key: &str, default: Value) -> Result<Value> {
        self.captured_mut()?.value_or(key, default).await
    }

    /// Whether the decoded body contains a top-level field.
    pub async fn has(&mut self, key: &str) -> Result<bool> {
        self.captured_mut()?.has(key).await
    }
}

/// Issues a one-shot GET request on a default instance.
///
/// ```rust,no_run
/// # async fn example() -> Result<(), repartee::Error> {
/// let mut http = repartee::get("https://api.example.com/status").await?;
/// println!("{}", http.status()?);
/// # Ok(())
/// # }
/// ```
pub async fn get(url: &str) -> Result<Http> {
    let mut http = Http::new();
    http.get(url, &[] as &[(&str, &str)]).await?;
    Ok(http)
}
