//! Procedural macros for triage response handlers.
//!
//! This crate provides:
//! - `#[derive(FromResponse)]` - Generate the constructor half of a handler
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use triage::prelude::*;
//!
//! #[derive(FromResponse)]
//! struct LoginPageHandler {
//!     response: Arc<Response>,
//! }
//!
//! impl Handler for LoginPageHandler {
//!     type Output = Value;
//!     type Error = PortalError;
//!
//!     fn handle(&self) -> Outcome<Value, PortalError> {
//!         self.decline_unless(self.response.is_html())?;
//!         // ...
//!     }
//! }
//! ```

mod from_response;

use proc_macro::TokenStream;

/// Derive the `FromResponse` trait for a struct.
///
/// The generated constructor stores the shared `Arc<Response>` in the
/// response field and fills every other field with `Default::default()`.
///
/// # Choosing the response field
///
/// 1. The field marked `#[response]`, if any.
/// 2. Otherwise the only field of the struct.
/// 3. Otherwise the only field whose type is an `Arc<...>`.
///
/// # Example
///
/// ```ignore
/// use std::marker::PhantomData;
/// use std::sync::Arc;
/// use triage::{FromResponse, Response};
///
/// #[derive(FromResponse)]
/// struct JsonRows<E> {
///     #[response]
///     page: Arc<Response>,
///     seen: Vec<String>,        // Default::default()
///     _error: PhantomData<E>,   // Default::default()
/// }
///
/// #[derive(FromResponse)]
/// struct Tuple(Arc<Response>);
/// ```
#[proc_macro_derive(FromResponse, attributes(response))]
pub fn derive_from_response(input: TokenStream) -> TokenStream {
    from_response::expand_from_response_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
