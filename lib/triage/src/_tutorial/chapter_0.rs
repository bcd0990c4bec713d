//! # Chapter 0: Getting Started
//!
//! Your first triage dispatcher in 5 minutes.
//!
//! ## What You'll Learn
//!
//! - Write a handler with `#[derive(FromResponse)]` and [`Handler`](crate::Handler)
//! - Register it under a namespace
//! - Dispatch a response to an ordered list of handlers
//!
//! ## Prerequisites
//!
//! Add to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! triage = "0.1"
//! ```
//!
//! ## Your First Handler
//!
//! A handler holds the response and decides whether it recognizes it:
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
//!     type Error = triage::Error;
//!
//!     fn handle(&self) -> Outcome<Self::Output, Self::Error> {
//!         // Not a CSV export? Let the next handler have a look.
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
//!
//! ## Register and Dispatch
//!
//! Handlers are registered under a qualified name `namespace::id`. A
//! dispatcher is bound to one namespace and resolves short ids in it:
//!
//! ```ignore
//! let mut registry = HandlerRegistry::new();
//! registry.register::<CsvHandler>("portal::csv")?;
//!
//! let dispatcher = Dispatcher::builder(Arc::new(registry))
//!     .namespace("portal")
//!     .build()?;
//!
//! let rows = dispatcher.handle(response, ["csv"])?;
//! ```
//!
//! ## Trial Order
//!
//! ```text
//! handle(response, ["a", "b"])   with defaults ["login"]
//!
//!   a ──declined──▶ b ──declined──▶ login ──declined──▶ fallback
//!   │               │               │
//!   value/error     value/error     value/error  (stop here)
//! ```
//!
//! - The first handler returning a value wins, later ones are never built.
//! - The same id may appear more than once; it is simply tried again.
//! - Every id is resolved before anything runs, so a typo fails the call up front.
//!
//! ## Next Steps
//!
//! - [Chapter 1: Errors & Fallbacks][super::chapter_1] - Domain errors, fallbacks, observers
