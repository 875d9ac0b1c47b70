//! Repartee is a crate aiming at providing a simple, fluent way to issue
//! HTTP(S) requests and read the answers back.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use repartee::{Conditional, Error, Http};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let token: Option<String> = std::env::var("API_TOKEN").ok();
//!
//! let mut http = Http::create("https://api.example.com")
//!     .accept_json()
//!     .when_some(token, |http, token| http.bearer(token));
//!
//! http.get("/users", &[("page", "1")]).await?;
//!
//! // 4xx/5xx are captured, not raised: branch on the status accessors.
//! if http.successful()? {
//!     println!("{}", http.to_json().await?);
//! } else {
//!     eprintln!("request failed with {}", http.status()?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! The repartee crate is organized into several modules:
//!
//! - [`client`] - The `Http` facade, its option set, and request dispatch
//! - [`conditional`] - Conditional-application helpers for call chains
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`response`] - Captured response state and body accessors

pub mod client;
pub mod conditional;
pub mod error;
pub mod response;

pub use client::{get, BodyMode, ClientTweak, Http, Options};
pub use conditional::Conditional;
pub use error::{Error, Result};
pub use response::Response;
