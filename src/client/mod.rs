//! Client module containing the fluent facade and its option set.
//!
//! This module provides the main [`Http`] struct and the configuration it
//! accumulates. It handles option accumulation, client construction, URL
//! resolution, and request dispatch.
//!
//! # Overview
//!
//! The client module is organized into two main components:
//!
//! - `http` - The `Http` facade: builder methods, dispatchers, and
//!   response accessors
//! - `options` - The `Options` structure and client construction logic
//!
//! # Examples
//!
//! ```rust,no_run
//! use repartee::{Error, Http};
//!
//! # async fn example() -> Result<(), Error> {
//! let mut http = Http::create("https://api.example.com").accept_json();
//! http.post("/reports", &serde_json::json!({ "name": "weekly" }))
//!     .await?;
//! assert!(http.successful()?);
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod options;

pub use http::{get, Http};
pub use options::{BodyMode, ClientTweak, Options};
