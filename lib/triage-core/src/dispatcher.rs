//! Dispatcher trying an ordered list of handlers against one response.
//!
//! The trial order is the call-supplied identifiers followed by the
//! configured default handlers. For each entry a fresh handler is built and
//! invoked:
//!
//! - decline: move on to the next entry,
//! - value: return it, later entries are never built,
//! - domain error: return it unchanged as [`DispatchError::Handler`].
//!
//! When every entry declines, the configured fallback is raised with the
//! response as [`DispatchError::Unrecognized`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use triage_core::{Dispatcher, HandlerRegistry};
//!
//! let dispatcher = Dispatcher::builder(Arc::new(registry))
//!     .namespace("portal")
//!     .default_handler("login_page")
//!     .build()?;
//!
//! let rows = dispatcher.handle(response, ["csv", "form"])?;
//! ```

use std::fmt;
use std::sync::Arc;

use crate::{
    DispatchError, DispatchObserver, DispatcherConfig, Error, HandlerFn, HandlerRegistry,
    Namespace, Rejection, Response, Result, Trial, UnexpectedResponse,
};

/// Raises the fallback value from the unrecognized response.
pub type FallbackFn<F> = Arc<dyn Fn(Arc<Response>) -> F + Send + Sync>;

/// Tries handlers in order until one does not decline.
///
/// - `T` - value produced by handlers.
/// - `E` - domain error raised by handlers.
/// - `F` - fallback raised when every handler declines.
///
/// A built dispatcher is immutable and can be shared and reused; each call to
/// [`handle`](Dispatcher::handle) is independent.
pub struct Dispatcher<T, E, F = UnexpectedResponse> {
    registry: Arc<HandlerRegistry<T, E>>,
    namespace: Namespace,
    default_handlers: Vec<(String, HandlerFn<T, E>)>,
    observers: Vec<Arc<dyn DispatchObserver>>,
    fallback: FallbackFn<F>,
}

impl<T, E> Dispatcher<T, E> {
    /// Create a new [`DispatcherBuilder`] resolving handlers in `registry`.
    #[must_use]
    pub fn builder(registry: Arc<HandlerRegistry<T, E>>) -> DispatcherBuilder<T, E> {
        DispatcherBuilder::new(registry)
    }
}

impl<T, E, F> Dispatcher<T, E, F> {
    /// Dispatch `response` to `handlers`, then to the default handlers.
    ///
    /// Every identifier is resolved before the first handler runs, so an
    /// unknown identifier fails the call without invoking anything.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Handler`] with the first domain error raised.
    /// - [`DispatchError::Unrecognized`] with the fallback if every handler declined.
    /// - [`DispatchError::Config`] if an identifier is malformed or unknown.
    pub fn handle<I>(
        &self,
        response: impl Into<Arc<Response>>,
        handlers: I,
    ) -> std::result::Result<T, DispatchError<E, F>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let response = response.into();
        let requested = handlers
            .into_iter()
            .map(|name| self.resolve(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut outcome = None;
        scoped(&self.observers, &self.namespace, &response, &mut || {
            outcome = Some(self.run(&requested, &response));
        });

        // An observer that never calls `run` does not cancel the dispatch.
        match outcome {
            Some(outcome) => outcome,
            None => self.run(&requested, &response),
        }
    }

    /// Dispatch `response` to the default handlers only.
    ///
    /// # Errors
    ///
    /// Same as [`handle`](Dispatcher::handle).
    pub fn handle_default(
        &self,
        response: impl Into<Arc<Response>>,
    ) -> std::result::Result<T, DispatchError<E, F>> {
        self.handle(response, std::iter::empty::<&str>())
    }

    /// Namespace used to resolve identifiers.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Default handler identifiers, in trial order.
    pub fn default_handlers(&self) -> impl Iterator<Item = &str> {
        self.default_handlers.iter().map(|(name, _)| name.as_str())
    }

    /// The registry handlers are resolved in.
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry<T, E> {
        &self.registry
    }

    fn run(
        &self,
        requested: &[(String, HandlerFn<T, E>)],
        response: &Arc<Response>,
    ) -> std::result::Result<T, DispatchError<E, F>> {
        let trials = requested.len() + self.default_handlers.len();
        self.notify(|observer| observer.started(&self.namespace, response, trials));

        for (position, (name, handler)) in requested
            .iter()
            .chain(&self.default_handlers)
            .enumerate()
        {
            let trial = Trial {
                namespace: &self.namespace,
                handler: name,
                position,
                response,
            };
            self.notify(|observer| observer.attempt(&trial));

            match handler(Arc::clone(response)) {
                Ok(value) => {
                    self.notify(|observer| observer.accepted(&trial));
                    return Ok(value);
                }
                Err(Rejection::Declined) => {
                    self.notify(|observer| observer.declined(&trial));
                }
                Err(Rejection::Failed(err)) => {
                    self.notify(|observer| observer.failed(&trial));
                    return Err(DispatchError::Handler(err));
                }
            }
        }

        self.notify(|observer| observer.exhausted(&self.namespace, response, trials));
        Err(DispatchError::Unrecognized((self.fallback)(Arc::clone(response))))
    }

    fn resolve(&self, name: &str) -> Result<(String, HandlerFn<T, E>)> {
        self.registry
            .resolve(&self.namespace, name)
            .map(|handler| (name.to_string(), handler))
    }

    fn notify(&self, event: impl Fn(&dyn DispatchObserver)) {
        for observer in &self.observers {
            event(observer.as_ref());
        }
    }
}

/// Run `run` inside the scope of every observer, first observer outermost.
fn scoped(
    observers: &[Arc<dyn DispatchObserver>],
    namespace: &Namespace,
    response: &Response,
    run: &mut dyn FnMut(),
) {
    match observers.split_first() {
        Some((first, rest)) => first.scope(namespace, response, &mut || {
            scoped(rest, namespace, response, &mut *run);
        }),
        None => run(),
    }
}

impl<T, E, F> Clone for Dispatcher<T, E, F> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            namespace: self.namespace.clone(),
            default_handlers: self.default_handlers.clone(),
            observers: self.observers.clone(),
            fallback: Arc::clone(&self.fallback),
        }
    }
}

impl<T, E, F> fmt::Debug for Dispatcher<T, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("namespace", &self.namespace)
            .field("default_handlers", &self.default_handlers().collect::<Vec<_>>())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Dispatcher`].
///
/// The fallback defaults to [`UnexpectedResponse`]; setting another one
/// changes the builder's `F` type.
pub struct DispatcherBuilder<T, E, F = UnexpectedResponse> {
    registry: Arc<HandlerRegistry<T, E>>,
    namespace: Option<String>,
    default_handlers: Vec<String>,
    observers: Vec<Arc<dyn DispatchObserver>>,
    fallback: FallbackFn<F>,
}

impl<T, E> DispatcherBuilder<T, E> {
    /// Create a builder with the default [`UnexpectedResponse`] fallback.
    #[must_use]
    pub fn new(registry: Arc<HandlerRegistry<T, E>>) -> Self {
        Self {
            registry,
            namespace: None,
            default_handlers: Vec::new(),
            observers: Vec::new(),
            fallback: Arc::new(UnexpectedResponse::new),
        }
    }
}

impl<T, E, F> DispatcherBuilder<T, E, F> {
    /// Set the handler namespace. Required.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Append a default handler, tried after the call-supplied ones.
    #[must_use]
    pub fn default_handler(mut self, name: impl Into<String>) -> Self {
        self.default_handlers.push(name.into());
        self
    }

    /// Append several default handlers.
    #[must_use]
    pub fn default_handlers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_handlers.extend(names.into_iter().map(Into::into));
        self
    }

    /// Apply a [`DispatcherConfig`].
    ///
    /// The config namespace, when present, replaces the current one; its
    /// default handlers are appended.
    #[must_use]
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        if let Some(namespace) = config.namespace {
            self.namespace = Some(namespace);
        }
        self.default_handlers.extend(config.default_handlers);
        self
    }

    /// Add an observer notified of every dispatch step.
    #[must_use]
    pub fn observer(mut self, observer: impl DispatchObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Raise the fallback with a function receiving the response.
    #[must_use]
    pub fn fallback<G>(
        self,
        raise: impl Fn(Arc<Response>) -> G + Send + Sync + 'static,
    ) -> DispatcherBuilder<T, E, G> {
        DispatcherBuilder {
            registry: self.registry,
            namespace: self.namespace,
            default_handlers: self.default_handlers,
            observers: self.observers,
            fallback: Arc::new(raise),
        }
    }

    /// Raise the fallback by constructing `G` from the response.
    #[must_use]
    pub fn fallback_type<G>(self) -> DispatcherBuilder<T, E, G>
    where
        G: From<Arc<Response>> + 'static,
    {
        self.fallback(<G as From<Arc<Response>>>::from)
    }

    /// Build the dispatcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace is missing or malformed, or if a
    /// default handler cannot be resolved.
    pub fn build(self) -> Result<Dispatcher<T, E, F>> {
        let namespace = Namespace::new(self.namespace.ok_or(Error::MissingNamespace)?)?;
        let default_handlers = self
            .default_handlers
            .into_iter()
            .map(|name| {
                let handler = self.registry.resolve(&namespace, &name)?;
                Ok((name, handler))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Dispatcher {
            registry: self.registry,
            namespace,
            default_handlers,
            observers: self.observers,
            fallback: self.fallback,
        })
    }
}

impl<T, E, F> fmt::Debug for DispatcherBuilder<T, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherBuilder")
            .field("namespace", &self.namespace)
            .field("default_handlers", &self.default_handlers)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
