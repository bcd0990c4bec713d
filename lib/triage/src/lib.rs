//! Dispatch HTTP responses to an ordered chain of recognizing handlers.
//!
//! Automated clients of human-facing web applications get back whatever the
//! server felt like sending: the CSV export, a login page, a form with
//! validation errors. `triage` lets each call list the handlers that may
//! recognize its response, tries them in order, and raises a fallback when
//! nobody claims it.
//!
//! # Example
//!
//! ```ignore
//! use triage::prelude::*;
//!
//! #[derive(FromResponse)]
//! struct CsvHandler {
//!     response: Arc<Response>,
//! }
//!
//! impl Handler for CsvHandler {
//!     type Output = Vec<Vec<String>>;
//!     type Error = PortalError;
//!
//!     fn handle(&self) -> Outcome<Self::Output, Self::Error> {
//!         self.decline_unless(self.response.content_type().as_deref() == Some("text/csv"))?;
//!         // ... parse rows
//!     }
//! }
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register::<CsvHandler>("portal::csv")?;
//!
//! let dispatcher = Dispatcher::builder(Arc::new(registry))
//!     .namespace("portal")
//!     .with_logging()
//!     .build()?;
//!
//! let rows = dispatcher.handle(response, ["csv"])?;
//! ```
//!
//! See the [tutorial][_tutorial] for a complete guide.

extern crate self as triage;

pub mod _tutorial;
mod ext;
pub mod handlers;
pub mod observer;
pub mod prelude;

pub use ext::DispatcherBuilderExt;
pub use handlers::register_builtin_handlers;

// Re-export core types
pub use triage_core::{
    Declined, DispatchError, DispatchObserver, Dispatcher, DispatcherBuilder, DispatcherConfig,
    DispatcherConfigBuilder, Error, FallbackFn, FromResponse, Handler, HandlerFn,
    HandlerRegistry, MediaType, Namespace, Outcome, Rejection, Response, Result, Trial,
    UnexpectedResponse, form_pairs, from_form, from_json,
};

// Re-export http types for status codes and headers
pub use triage_core::{StatusCode, header};

// Re-export the derive macro (shares its name with the trait)
pub use triage_macro::FromResponse;
