//! Error types for triage.
//!
//! [`Error`] covers configuration mistakes (unknown handlers, bad namespaces)
//! and body decoding failures. Errors raised by handlers themselves are never
//! wrapped into [`Error`]: they reach the caller through
//! [`DispatchError::Handler`] exactly as the handler produced them.

use std::fmt;
use std::sync::Arc;

use derive_more::{Display, Error, From};

use crate::Response;

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for triage operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The dispatcher was built without a handler namespace.
    #[display("missing handler namespace")]
    #[from(skip)]
    MissingNamespace,

    /// The handler namespace is malformed.
    #[display("invalid handler namespace: {_0:?}")]
    #[from(skip)]
    InvalidNamespace(#[error(not(source))] String),

    /// A handler identifier is malformed.
    #[display("invalid handler name: {_0:?}")]
    #[from(skip)]
    InvalidHandlerName(#[error(not(source))] String),

    /// No handler is registered under the qualified name.
    #[display("unknown handler '{name}' in namespace '{namespace}'")]
    #[from(skip)]
    UnknownHandler {
        /// Namespace the identifier was resolved in.
        namespace: String,
        /// Short handler identifier.
        name: String,
    },

    /// A handler was registered twice under the same qualified name.
    #[display("handler '{_0}' is already registered")]
    #[from(skip)]
    DuplicateHandler(#[error(not(source))] String),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Form URL-encoded deserialization error.
    #[display("form deserialization error: {_0}")]
    #[from]
    FormDeserialization(serde::de::value::Error),

    /// The response body is not valid UTF-8.
    #[display("invalid UTF-8 body: {_0}")]
    #[from]
    InvalidUtf8(std::str::Utf8Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid namespace error.
    #[must_use]
    pub fn invalid_namespace(namespace: impl Into<String>) -> Self {
        Self::InvalidNamespace(namespace.into())
    }

    /// Create an invalid handler name error.
    #[must_use]
    pub fn invalid_handler_name(name: impl Into<String>) -> Self {
        Self::InvalidHandlerName(name.into())
    }

    /// Create an unknown handler error.
    #[must_use]
    pub fn unknown_handler(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownHandler {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Create a duplicate handler error.
    #[must_use]
    pub fn duplicate_handler(name: impl Into<String>) -> Self {
        Self::DuplicateHandler(name.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for configuration errors (namespace, handler names, registry).
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingNamespace
                | Self::InvalidNamespace(_)
                | Self::InvalidHandlerName(_)
                | Self::UnknownHandler { .. }
                | Self::DuplicateHandler(_)
        )
    }

    /// Returns `true` if a handler identifier could not be resolved.
    #[must_use]
    pub const fn is_unknown_handler(&self) -> bool {
        matches!(self, Self::UnknownHandler { .. })
    }

    /// Returns `true` for body decoding errors.
    #[must_use]
    pub const fn is_decoding(&self) -> bool {
        matches!(
            self,
            Self::JsonDeserialization { .. } | Self::FormDeserialization(_) | Self::InvalidUtf8(_)
        )
    }
}

// ============================================================================
// Fallback
// ============================================================================

/// Default fallback raised when every handler declines a response.
///
/// Carries the original response so callers can inspect what went unrecognized.
#[derive(Debug, Clone)]
pub struct UnexpectedResponse {
    response: Arc<Response>,
}

impl UnexpectedResponse {
    /// Wrap the unrecognized response.
    #[must_use]
    pub fn new(response: Arc<Response>) -> Self {
        Self { response }
    }

    /// The response no handler accepted.
    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Consume into the shared response.
    #[must_use]
    pub fn into_response(self) -> Arc<Response> {
        self.response
    }
}

impl From<Arc<Response>> for UnexpectedResponse {
    fn from(response: Arc<Response>) -> Self {
        Self::new(response)
    }
}

impl fmt::Display for UnexpectedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected response: HTTP {}", self.response.status())?;
        if let Some(content_type) = self.response.content_type() {
            write!(f, " ({content_type})")?;
        }
        Ok(())
    }
}

impl std::error::Error for UnexpectedResponse {}

// ============================================================================
// Dispatch Error
// ============================================================================

/// Error returned by [`Dispatcher::handle`](crate::Dispatcher::handle).
///
/// - `E` is the domain error type raised by handlers.
/// - `F` is the fallback raised when every handler declines, [`UnexpectedResponse`] by default.
///
/// There is deliberately no variant for a declined handler.
#[derive(Debug)]
pub enum DispatchError<E, F = UnexpectedResponse> {
    /// A handler recognized the response and raised a domain error.
    Handler(E),
    /// Every handler in the trial order declined.
    Unrecognized(F),
    /// The dispatch could not run because of a configuration error.
    Config(Error),
}

impl<E, F> DispatchError<E, F> {
    /// Returns `true` if every handler declined the response.
    #[must_use]
    pub const fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }

    /// Returns `true` if a handler raised a domain error.
    #[must_use]
    pub const fn is_handler(&self) -> bool {
        matches!(self, Self::Handler(_))
    }

    /// Returns `true` for configuration errors.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// The handler's domain error, if any.
    #[must_use]
    pub fn into_handler_error(self) -> Option<E> {
        match self {
            Self::Handler(err) => Some(err),
            _ => None,
        }
    }

    /// The fallback value, if every handler declined.
    #[must_use]
    pub fn into_unrecognized(self) -> Option<F> {
        match self {
            Self::Unrecognized(fallback) => Some(fallback),
            _ => None,
        }
    }
}

impl<E, F> From<Error> for DispatchError<E, F> {
    fn from(err: Error) -> Self {
        Self::Config(err)
    }
}

impl<E: fmt::Display, F: fmt::Display> fmt::Display for DispatchError<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(err) => write!(f, "{err}"),
            Self::Unrecognized(fallback) => write!(f, "{fallback}"),
            Self::Config(err) => write!(f, "dispatch configuration error: {err}"),
        }
    }
}

impl<E, F> std::error::Error for DispatchError<E, F>
where
    E: std::error::Error + 'static,
    F: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Handler(err) => Some(err),
            Self::Unrecognized(fallback) => Some(fallback),
            Self::Config(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::check;
    use bytes::Bytes;
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn error_display() {
        assert_snapshot!(Error::MissingNamespace.to_string(), @"missing handler namespace");
        assert_snapshot!(
            Error::unknown_handler("portal", "csv").to_string(),
            @"unknown handler 'csv' in namespace 'portal'"
        );
        assert_snapshot!(
            Error::duplicate_handler("portal::csv").to_string(),
            @"handler 'portal::csv' is already registered"
        );
        assert_snapshot!(
            Error::invalid_namespace("a b").to_string(),
            @r#"invalid handler namespace: "a b""#
        );

        let err = Error::json_deserialization("user.address.city", "missing field `city`");
        assert_eq!(
            err.to_string(),
            "JSON deserialization error at 'user.address.city': missing field `city`"
        );
    }

    #[test]
    fn error_predicates() {
        check!(Error::MissingNamespace.is_configuration());
        check!(Error::unknown_handler("a", "b").is_configuration());
        check!(Error::unknown_handler("a", "b").is_unknown_handler());
        check!(!Error::duplicate_handler("a::b").is_unknown_handler());

        let err = Error::json_deserialization("", "expected value");
        check!(err.is_decoding());
        check!(!err.is_configuration());
    }

    #[test]
    fn unexpected_response_display() {
        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "text/html; charset=utf-8".to_string(),
        );
        let response = Arc::new(Response::new(200, headers, Bytes::from("<html></html>")));

        let err = UnexpectedResponse::new(Arc::clone(&response));
        assert_snapshot!(err.to_string(), @"unexpected response: HTTP 200 (text/html)");
        check!(err.response().status() == 200);
        check!(Arc::ptr_eq(&err.into_response(), &response));

        let bare = UnexpectedResponse::from(Arc::new(Response::new(
            502,
            HashMap::new(),
            Bytes::new(),
        )));
        assert_snapshot!(bare.to_string(), @"unexpected response: HTTP 502");
    }

    #[test]
    fn dispatch_error_accessors() {
        let err: DispatchError<String> = DispatchError::Handler("login required".to_string());
        check!(err.is_handler());
        check!(!err.is_unrecognized());
        check!(err.into_handler_error() == Some("login required".to_string()));

        let err: DispatchError<String> = Error::MissingNamespace.into();
        check!(err.is_config());
        assert_snapshot!(
            err.to_string(),
            @"dispatch configuration error: missing handler namespace"
        );
        check!(err.into_unrecognized().is_none());
    }
}
