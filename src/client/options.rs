//! Option set and client construction for the HTTP facade.
//!
//! This module defines the [`Options`] structure accumulated by the builder
//! methods on [`Http`], along with the logic that turns an option set into a
//! configured `reqwest::Client` and resolves request URLs against the
//! optional base URL.
//!
//! # Examples
//!
//! ```rust
//! use repartee::client::{BodyMode, Options};
//! use std::time::Duration;
//!
//! let options = Options::default();
//! assert_eq!(options.timeout, Duration::from_secs(10));
//! assert!(options.verify);
//! assert_eq!(options.body_mode, BodyMode::Json);
//! ```
//!
//! [`Http`]: crate::Http

use crate::error::{Error, Result};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Url};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Escape hatch applied to the `reqwest::ClientBuilder` when a client is
/// built, for transport options without a dedicated mutator.
pub type ClientTweak = Box<dyn Fn(ClientBuilder) -> ClientBuilder + Send + Sync>;

/// How request payloads are encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyMode {
    /// Send the payload as a JSON document.
    #[default]
    Json,
    /// Send the payload as form-encoded fields.
    Form,
}

/// The accumulated option set used to parameterize a dispatch.
#[derive(Clone)]
pub struct Options {
    /// Verbose request/response tracing.
    pub debug: bool,
    /// TLS certificate verification.
    pub verify: bool,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Default headers, keyed by lowercase header name.
    pub headers: BTreeMap<String, String>,
    /// Optional prefix for relative request URLs.
    pub base_url: Option<String>,
    /// Maximum number of redirects to follow. Zero disables following.
    pub max_redirects: usize,
    /// Active payload encoding.
    pub body_mode: BodyMode,
    /// Client configuration tweaks, applied in insertion order.
    pub tweaks: Vec<Arc<ClientTweak>>,
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("debug", &self.debug)
            .field("verify", &self.verify)
            .field("timeout", &self.timeout)
            .field("headers", &self.headers)
            .field("base_url", &self.base_url)
            .field("max_redirects", &self.max_redirects)
            .field("body_mode", &self.body_mode)
            .field("tweaks", &self.tweaks.len())
            .finish()
    }
}

impl Default for Options {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("accept".into(), "application/json".into());
        headers.insert("content-type".into(), "application/json".into());

        Self {
            debug: false,
            verify: true,
            timeout: Duration::from_secs(10),
            headers,
            base_url: None,
            max_redirects: 5,
            body_mode: BodyMode::default(),
            tweaks: Vec::new(),
        }
    }
}

impl Options {
    /// Sets a single header, replacing any prior value for that name.
    ///
    /// Header names are case-insensitive, so they are normalized to
    /// lowercase before insertion.
    pub(crate) fn set_header(&mut self, key: &str, value: impl Into<String>) {
        self.headers.insert(key.to_ascii_lowercase(), value.into());
    }

    /// Builds the default header map, validating names and values.
    fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::InvalidHeader(format!("{}: {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidHeader(format!("{}: {}", key, e)))?;
            map.insert(name, value);
        }
        Ok(map)
    }

    /// Creates a `reqwest::Client` configured from this option set.
    ///
    /// Invalid header names or values surface here, so a bad value chained
    /// earlier fails at dispatch time the same way a malformed URL does.
    pub(crate) fn build_client(&self) -> Result<Client> {
        let redirect = if self.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(self.max_redirects)
        };

        let mut builder = Client::builder()
            .default_headers(self.header_map()?)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify)
            .connection_verbose(self.debug)
            .redirect(redirect);

        for tweak in &self.tweaks {
            builder = tweak(builder);
        }

        Ok(builder.build()?)
    }

    /// Resolves a request URL against the configured base URL.
    ///
    /// Relative URLs are joined to the base per RFC 3986; absolute URLs are
    /// used as-is. Without a base URL the request URL must be absolute.
    pub(crate) fn resolve_url(&self, url: &str) -> Result<Url> {
        match &self.base_url {
            Some(base) => {
                let base = Url::parse(base).map_err(|e| {
                    Error::InvalidUrl(format!("The base url \"{}\" cannot be parsed: {}", base, e))
                })?;
                base.join(url).map_err(|e| {
                    Error::InvalidUrl(format!(
                        "The url \"{}\" cannot be resolved against \"{}\": {}",
                        url, base, e
                    ))
                })
            }
            None => Url::parse(url)
                .map_err(|e| Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", url, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert!(!options.debug);
        assert!(options.verify);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.base_url, None);
        assert_eq!(options.max_redirects, 5);
        assert_eq!(options.body_mode, BodyMode::Json);
        assert_eq!(
            options.headers.get("accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            options.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_set_header_normalizes_case() {
        let mut options = Options::default();
        options.set_header("X-Custom", "one");
        options.set_header("x-custom", "two");
        assert_eq!(options.headers.get("x-custom").map(String::as_str), Some("two"));
        assert!(!options.headers.contains_key("X-Custom"));
    }

    #[test]
    fn test_build_client_default() {
        let options = Options::default();
        assert!(options.build_client().is_ok());
    }

    #[test]
    fn test_build_client_invalid_header_value() {
        let mut options = Options::default();
        options.set_header("x-bad", "line\nbreak");
        let err = options.build_client().err().expect("invalid header value should fail");
        match err {
            Error::InvalidHeader(msg) => assert!(msg.contains("x-bad")),
            other => panic!("Expected InvalidHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_url_absolute() {
        let options = Options::default();
        let url = options.resolve_url("https://example.com/users").unwrap();
        assert_eq!(url.as_str(), "https://example.com/users");
    }

    #[test]
    fn test_resolve_url_relative_without_base() {
        let options = Options::default();
        assert!(matches!(
            options.resolve_url("/users"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_resolve_url_joins_base() {
        let options = Options {
            base_url: Some("https://api.example.com".into()),
            ..Options::default()
        };
        let url = options.resolve_url("/v1/users").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/users");
    }

    #[test]
    fn test_resolve_url_absolute_bypasses_base() {
        let options = Options {
            base_url: Some("https://api.example.com".into()),
            ..Options::default()
        };
        let url = options.resolve_url("https://other.example.com/ping").unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/ping");
    }

    #[test]
    fn test_options_debug_format() {
        let options = Options::default();
        let debug_str = format!("{:?}", options);
        assert!(debug_str.contains("Options"));
        assert!(debug_str.contains("max_redirects"));
    }
}
