//! # Chapter 1: Errors & Fallbacks
//!
//! What happens when a response is recognized but bad, or not recognized at all.
//!
//! ## Domain Errors
//!
//! A handler that recognizes an unacceptable response (a login page, a form
//! with validation messages) raises its own error type. The dispatcher stops
//! and returns it unchanged:
//!
//! ```ignore
//! #[derive(Debug)]
//! enum PortalError {
//!     LoginRequired,
//! }
//!
//! impl Handler for LoginPageHandler {
//!     type Output = Vec<Vec<String>>;
//!     type Error = PortalError;
//!
//!     fn handle(&self) -> Outcome<Self::Output, Self::Error> {
//!         self.decline_unless(self.response.is_html())?;
//!         let page = self.response.text().map_err(|_| Rejection::Declined)?;
//!         self.decline_unless(page.contains("name=\"password\""))?;
//!         Err(Rejection::Failed(PortalError::LoginRequired))
//!     }
//! }
//!
//! match dispatcher.handle(response, ["csv", "login_page"]) {
//!     Ok(rows) => println!("{} rows", rows.len()),
//!     Err(DispatchError::Handler(PortalError::LoginRequired)) => relogin(),
//!     Err(DispatchError::Unrecognized(err)) => eprintln!("{err}"),
//!     Err(DispatchError::Config(err)) => panic!("misconfigured: {err}"),
//! }
//! ```
//!
//! ## Fallbacks
//!
//! When every handler declines, the dispatcher raises
//! [`UnexpectedResponse`](crate::UnexpectedResponse) holding the response.
//! Use your own type instead with `fallback_type` (or `fallback` for a closure):
//!
//! ```ignore
//! struct NotAnExport(Arc<Response>);
//!
//! impl From<Arc<Response>> for NotAnExport {
//!     fn from(response: Arc<Response>) -> Self {
//!         Self(response)
//!     }
//! }
//!
//! let dispatcher = Dispatcher::builder(registry)
//!     .namespace("portal")
//!     .fallback_type::<NotAnExport>()
//!     .build()?;
//! ```
//!
//! ## Default Handlers
//!
//! Handlers every call should fall through to, like session expiry checks,
//! go in the defaults. They can also come from configuration:
//!
//! ```ignore
//! let config = DispatcherConfig::from_json(br#"{
//!     "namespace": "portal",
//!     "default_handlers": ["login_page", "no_content"]
//! }"#)?;
//!
//! let dispatcher = Dispatcher::builder(registry).config(config).build()?;
//! ```
//!
//! ## Built-in Handlers
//!
//! For `serde_json::Value` outputs, [`register_builtin_handlers`](crate::register_builtin_handlers)
//! adds `json`, `form`, `text` and `no_content` to a namespace.
//!
//! ## Observers
//!
//! The dispatcher never logs on its own. Add the bundled observers:
//!
//! | Method | Observer | Feature |
//! |--------|----------|---------|
//! | `.with_logging()` | [`LoggingObserver`](crate::observer::LoggingObserver) | - |
//! | `.with_debug_logging()` | `LoggingObserver` at debug level | - |
//! | `.with_metrics()` | `MetricsObserver` | `metrics` |
//!
//! Or implement [`DispatchObserver`](crate::DispatchObserver) yourself.
