//! Conditional application helpers for chained builders.
//!
//! The [`Conditional`] trait lets a call chain apply a mutation only when a
//! predicate holds, without breaking out of the chain:
//!
//! ```rust
//! use repartee::{Conditional, Http};
//!
//! let verbose = std::env::var("VERBOSE").is_ok();
//! let token: Option<String> = std::env::var("API_TOKEN").ok();
//!
//! let http = Http::new()
//!     .when(verbose, |http| http.debug(true))
//!     .when_some(token, |http, token| http.bearer(token));
//! ```
//!
//! All helpers take `FnOnce` closures, so the closure is never evaluated
//! when the condition does not match.

/// Conditionally apply mutations in a call chain.
pub trait Conditional: Sized {
    /// Applies `f` when `condition` is true.
    fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition {
            f(self)
        } else {
            self
        }
    }

    /// Applies `f` when `condition` is false.
    fn unless<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.when(!condition, f)
    }

    /// Applies `f` with the contained value when `value` is `Some`.
    fn when_some<T, F>(self, value: Option<T>, f: F) -> Self
    where
        F: FnOnce(Self, T) -> Self,
    {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }

    /// Applies `f` only when `condition` is exactly `Some(true)`.
    fn when_true<F>(self, condition: Option<bool>, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.when(condition == Some(true), f)
    }

    /// Applies `f` only when `condition` is exactly `Some(false)`.
    fn when_false<F>(self, condition: Option<bool>, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.when(condition == Some(false), f)
    }

    /// Applies `f` only when `value` is absent.
    fn when_none<T, F>(self, value: &Option<T>, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.when(value.is_none(), f)
    }
}
