//! Handler registry mapping qualified names to handler factories.
//!
//! The registry is populated once at startup and then shared (via `Arc`) by
//! every dispatcher that resolves identifiers against it. Each entry builds a
//! fresh handler for the response and runs it.
//!
//! # Example
//!
//! ```ignore
//! use triage_core::{HandlerRegistry, Namespace};
//!
//! let namespace = Namespace::new("portal")?;
//! let mut registry = HandlerRegistry::new();
//! registry
//!     .register::<CsvHandler>(namespace.qualify("csv"))?
//!     .register::<LoginPageHandler>(namespace.qualify("login_page"))?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::namespace::validate_handler_name;
use crate::{Error, Handler, Namespace, Outcome, Response, Result};

/// A type-erased "construct then handle" entry.
pub type HandlerFn<T, E> = Arc<dyn Fn(Arc<Response>) -> Outcome<T, E> + Send + Sync>;

/// Registry mapping fully qualified handler names to handlers.
///
/// All handlers in one registry share the same `Output` (`T`) and domain
/// error (`E`) types.
pub struct HandlerRegistry<T, E> {
    handlers: HashMap<String, HandlerFn<T, E>>,
}

impl<T, E> HandlerRegistry<T, E> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a [`Handler`] type under a fully qualified name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is malformed or already registered.
    pub fn register<H>(&mut self, name: impl Into<String>) -> Result<&mut Self>
    where
        H: Handler<Output = T, Error = E> + 'static,
        T: 'static,
        E: 'static,
    {
        self.insert(
            name.into(),
            Arc::new(|response| H::from_response(response).handle()),
        )
    }

    /// Register a closure under a fully qualified name.
    ///
    /// The closure plays both roles of a handler: it receives the response and
    /// returns the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is malformed or already registered.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, handler: F) -> Result<&mut Self>
    where
        F: Fn(Arc<Response>) -> Outcome<T, E> + Send + Sync + 'static,
    {
        self.insert(name.into(), Arc::new(handler))
    }

    fn insert(&mut self, name: String, handler: HandlerFn<T, E>) -> Result<&mut Self> {
        validate_handler_name(&name)?;
        if self.handlers.contains_key(&name) {
            return Err(Error::duplicate_handler(name));
        }
        self.handlers.insert(name, handler);
        Ok(self)
    }

    /// Returns `true` if a handler is registered under the qualified name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered qualified names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Resolve a short identifier within a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHandler`] if nothing is registered under the
    /// qualified name.
    pub fn resolve(&self, namespace: &Namespace, name: &str) -> Result<HandlerFn<T, E>> {
        self.handlers
            .get(&namespace.qualify(name))
            .cloned()
            .ok_or_else(|| Error::unknown_handler(namespace.as_str(), name))
    }
}

impl<T, E> Default for HandlerRegistry<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for HandlerRegistry<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
