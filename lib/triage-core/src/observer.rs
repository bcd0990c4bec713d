//! Dispatch observation hooks.
//!
//! The dispatcher itself never logs. Observers registered on a
//! [`DispatcherBuilder`](crate::DispatcherBuilder) are notified of every step
//! of the trial loop instead, which is how logging and metrics are layered on.

use crate::{Namespace, Response};

/// One step of the trial order.
#[derive(Debug, Clone, Copy)]
pub struct Trial<'a> {
    /// Namespace the handler was resolved in.
    pub namespace: &'a Namespace,
    /// Short handler identifier.
    pub handler: &'a str,
    /// Zero-based position in the trial order.
    pub position: usize,
    /// The response being dispatched.
    pub response: &'a Response,
}

/// Callbacks for each step of a dispatch.
///
/// All methods default to doing nothing.
pub trait DispatchObserver: Send + Sync {
    /// Wraps one whole dispatch. Every other callback of that dispatch runs
    /// inside `run`, so this is where a logging span is entered.
    ///
    /// Implementations must call `run` exactly once.
    fn scope(&self, _namespace: &Namespace, _response: &Response, run: &mut dyn FnMut()) {
        run();
    }

    /// A dispatch started with `trials` handlers in the trial order.
    fn started(&self, _namespace: &Namespace, _response: &Response, _trials: usize) {}

    /// A handler is about to be constructed and invoked.
    fn attempt(&self, _trial: &Trial<'_>) {}

    /// The handler declined.
    fn declined(&self, _trial: &Trial<'_>) {}

    /// The handler accepted the response.
    fn accepted(&self, _trial: &Trial<'_>) {}

    /// The handler raised a domain error.
    fn failed(&self, _trial: &Trial<'_>) {}

    /// Every handler declined; the fallback is about to be raised.
    fn exhausted(&self, _namespace: &Namespace, _response: &Response, _trials: usize) {}
}

impl<O: DispatchObserver + ?Sized> DispatchObserver for std::sync::Arc<O> {
    fn scope(&self, namespace: &Namespace, response: &Response, run: &mut dyn FnMut()) {
        (**self).scope(namespace, response, run);
    }

    fn started(&self, namespace: &Namespace, response: &Response, trials: usize) {
        (**self).started(namespace, response, trials);
    }

    fn attempt(&self, trial: &Trial<'_>) {
        (**self).attempt(trial);
    }

    fn declined(&self, trial: &Trial<'_>) {
        (**self).declined(trial);
    }

    fn accepted(&self, trial: &Trial<'_>) {
        (**self).accepted(trial);
    }

    fn failed(&self, trial: &Trial<'_>) {
        (**self).failed(trial);
    }

    fn exhausted(&self, namespace: &Namespace, response: &Response, trials: usize) {
        (**self).exhausted(namespace, response, trials);
    }
}
