//! Handler contract.
//!
//! A handler wraps one [`Response`] and one recognition rule. Its
//! [`handle`](Handler::handle) operation has three exits:
//!
//! - `Ok(value)` - the response was recognized and fully handled.
//! - `Err(Rejection::Declined)` - "not my concern", the dispatcher moves on.
//! - `Err(Rejection::Failed(err))` - recognized but unacceptable (login page,
//!   validation errors, ...). The dispatcher stops and hands `err` to its caller.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use triage_core::{FromResponse, Handler, Outcome, Response};
//!
//! struct CsvHandler {
//!     response: Arc<Response>,
//! }
//!
//! impl FromResponse for CsvHandler {
//!     fn from_response(response: Arc<Response>) -> Self {
//!         Self { response }
//!     }
//! }
//!
//! impl Handler for CsvHandler {
//!     type Output = Vec<Vec<String>>;
//!     type Error = triage_core::Error;
//!
//!     fn handle(&self) -> Outcome<Self::Output, Self::Error> {
//!         self.decline_unless(self.response.content_type().as_deref() == Some("text/csv"))?;
//!
//!         let text = self.response.text().map_err(|e| self.fail(e))?;
//!         Ok(text
//!             .lines()
//!             .map(|line| line.split(',').map(str::to_string).collect())
//!             .collect())
//!     }
//! }
//! ```

use std::convert::Infallible;
use std::sync::Arc;

use derive_more::Display;

use crate::Response;

/// The decline signal: "this response is not my concern".
///
/// Carries no data. Converts into any [`Rejection`] so handlers can use `?`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[display("handler declined the response")]
pub struct Declined;

impl std::error::Error for Declined {}

/// Why a handler did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection<E> {
    /// The handler does not recognize the response.
    Declined,
    /// The handler recognized the response and raised a domain error.
    Failed(E),
}

impl<E> Rejection<E> {
    /// Returns `true` for [`Rejection::Declined`].
    #[must_use]
    pub const fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }

    /// The domain error, if the handler failed.
    #[must_use]
    pub fn into_error(self) -> Option<E> {
        match self {
            Self::Declined => None,
            Self::Failed(err) => Some(err),
        }
    }

    /// Convert the domain error type.
    pub fn map<F>(self, f: impl FnOnce(E) -> F) -> Rejection<F> {
        match self {
            Self::Declined => Rejection::Declined,
            Self::Failed(err) => Rejection::Failed(f(err)),
        }
    }
}

impl<E> From<Declined> for Rejection<E> {
    fn from(_: Declined) -> Self {
        Self::Declined
    }
}

/// Result of [`Handler::handle`].
pub type Outcome<T, E> = Result<T, Rejection<E>>;

/// Construction half of the handler contract.
///
/// Construction takes the shared response and cannot fail.
/// `#[derive(FromResponse)]` from the `triage` crate generates it.
pub trait FromResponse {
    /// Build a handler instance for one response.
    fn from_response(response: Arc<Response>) -> Self;
}

/// A single recognition + reaction rule for one response.
///
/// A new instance is built for every dispatch attempt and dropped right after
/// [`handle`](Handler::handle) returns. Handlers should perform one
/// recognition test (content type, body shape, ...) before deciding to
/// decline or proceed.
pub trait Handler: FromResponse {
    /// Structured data produced when the response is recognized.
    type Output;

    /// Domain error raised for recognized-but-unacceptable responses.
    type Error;

    /// Recognize and react to the response.
    fn handle(&self) -> Outcome<Self::Output, Self::Error>;

    /// Signal "not my concern". Always returns `Err(Declined)`.
    ///
    /// Use with `?` so nothing after the decline point runs:
    ///
    /// ```ignore
    /// if !self.response.is_json() {
    ///     self.decline()?;
    /// }
    /// ```
    fn decline(&self) -> Result<Infallible, Declined> {
        Err(Declined)
    }

    /// Decline unless the recognition test passed.
    fn decline_unless(&self, recognized: bool) -> Result<(), Declined> {
        if recognized { Ok(()) } else { Err(Declined) }
    }

    /// Wrap a domain error into [`Rejection::Failed`].
    fn fail<X>(&self, error: X) -> Rejection<Self::Error>
    where
        Self::Error: From<X>,
    {
        Rejection::Failed(error.into())
    }
}
