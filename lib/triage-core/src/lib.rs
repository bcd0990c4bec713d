//! Core types and traits for triage response dispatching.
//!
//! Automated clients of human-facing web applications cannot assume a single
//! response shape per request. This crate tries an ordered list of handlers
//! against one response until one claims it:
//!
//! - [`Response`] - buffered HTTP response handed to handlers
//! - [`Handler`] and [`FromResponse`] - the handler contract
//! - [`Declined`] and [`Rejection`] - decline signal and handler outcomes
//! - [`Namespace`] and [`HandlerRegistry`] - identifier resolution
//! - [`Dispatcher`] and [`DispatcherBuilder`] - the trial loop
//! - [`DispatcherConfig`] - serializable dispatcher configuration
//! - [`DispatchObserver`] - hooks for logging and metrics
//! - [`Error`], [`DispatchError`] and [`UnexpectedResponse`] - error handling
//! - [`StatusCode`] and [`header`] - re-exported from the `http` crate

mod body;
mod config;
mod dispatcher;
mod error;
mod handler;
mod namespace;
mod observer;
pub mod prelude;
mod registry;
mod response;

pub use body::{MediaType, form_pairs, from_form, from_json};
pub use config::{DispatcherConfig, DispatcherConfigBuilder};
pub use dispatcher::{Dispatcher, DispatcherBuilder, FallbackFn};
pub use error::{DispatchError, Error, Result, UnexpectedResponse};
pub use handler::{Declined, FromResponse, Handler, Outcome, Rejection};
pub use namespace::Namespace;
pub use observer::{DispatchObserver, Trial};
pub use registry::{HandlerFn, HandlerRegistry};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
