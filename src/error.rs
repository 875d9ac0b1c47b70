//! Error handling for the Repartee library.
//!
//! This module provides centralized error handling with the error types that
//! can occur while configuring, dispatching, or reading back a request. HTTP
//! error statuses (4xx/5xx) are deliberately *not* represented here: they are
//! captured as regular responses and inspected through the status accessors.

use thiserror::Error;

/// Errors that can happen when using Repartee.
///
/// Only infrastructure-level failures surface through this enum. A response
/// with an error status code is stored like any other response and never
/// produces an [`Error`].
#[derive(Error, Debug)]
pub enum Error {
    /// No response has been captured yet.
    ///
    /// Returned when a response accessor is called before any dispatch has
    /// completed on this instance.
    #[error("no response available: nothing has been dispatched yet")]
    NoResponse,

    /// Error from the underlying URL parser or the expected URL format.
    ///
    /// This variant is returned when a request URL cannot be parsed, or when
    /// a relative URL is used without a configured base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A configured header name or value is not valid HTTP.
    ///
    /// Header values are validated when the client is built, so this
    /// surfaces at dispatch time rather than while chaining.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The response body is not valid JSON.
    ///
    /// Distinguishable from an absent or empty body, which the JSON
    /// accessors report as `None` instead.
    #[error("Malformed JSON body")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    /// Error from the Reqwest library.
    ///
    /// This variant wraps transport errors from the reqwest library:
    /// connection failures, DNS resolution errors, and timeouts.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

/// Result type alias for operations that can fail with a Repartee error.
pub type Result<T> = std::result::Result<T, Error>;
