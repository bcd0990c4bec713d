//! Dispatch logging with the `tracing` crate.

use tracing::{Level, debug, info, span, warn};

use crate::{DispatchObserver, Namespace, Response, Trial};

/// Log level for [`LoggingObserver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log every handler attempt and decline.
    Debug,
    /// Log dispatch outcomes only.
    #[default]
    Info,
}

/// Observer emitting `tracing` events inside one `dispatch` span per dispatch.
///
/// # Example
///
/// ```ignore
/// use triage::observer::LoggingObserver;
///
/// let dispatcher = Dispatcher::builder(registry)
///     .namespace("portal")
///     .observer(LoggingObserver::debug())
///     .build()?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver {
    level: LogLevel,
}

impl LoggingObserver {
    /// Create an observer logging at info level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an observer logging at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    fn is_debug(&self) -> bool {
        self.level == LogLevel::Debug
    }
}

impl DispatchObserver for LoggingObserver {
    fn scope(&self, namespace: &Namespace, response: &Response, run: &mut dyn FnMut()) {
        span!(
            Level::INFO,
            "dispatch",
            namespace = %namespace,
            status = response.status(),
        )
        .in_scope(run);
    }

    fn started(&self, _namespace: &Namespace, response: &Response, trials: usize) {
        if self.is_debug() {
            debug!(
                trials,
                content_type = response.content_type().as_deref().unwrap_or("-"),
                url = response.url().map(|url| url.as_str()).unwrap_or("-"),
                "dispatching response"
            );
        }
    }

    fn attempt(&self, trial: &Trial<'_>) {
        if self.is_debug() {
            debug!(handler = trial.handler, position = trial.position, "trying handler");
        }
    }

    fn declined(&self, trial: &Trial<'_>) {
        if self.is_debug() {
            debug!(handler = trial.handler, position = trial.position, "handler declined");
        }
    }

    fn accepted(&self, trial: &Trial<'_>) {
        info!(handler = trial.handler, position = trial.position, "response recognized");
    }

    fn failed(&self, trial: &Trial<'_>) {
        warn!(handler = trial.handler, position = trial.position, "handler raised an error");
    }

    fn exhausted(&self, _namespace: &Namespace, response: &Response, trials: usize) {
        warn!(
            trials,
            content_type = response.content_type().as_deref().unwrap_or("-"),
            "no handler recognized the response"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use assert2::check;
    use serde_json::Value;
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Metadata, Subscriber};

    use super::*;
    use crate::{Dispatcher, Error, HandlerRegistry, register_builtin_handlers};

    /// Collects span names and, for each event, how many spans were entered.
    #[derive(Debug, Default)]
    struct Captured {
        spans: Mutex<Vec<&'static str>>,
        events: Mutex<Vec<(Level, usize)>>,
        depth: AtomicUsize,
        next_id: AtomicU64,
    }

    #[derive(Debug, Clone, Default)]
    struct Capture(Arc<Captured>);

    impl Subscriber for Capture {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, span: &Attributes<'_>) -> Id {
            self.0.spans.lock().expect("lock").push(span.metadata().name());
            Id::from_u64(self.0.next_id.fetch_add(1, Ordering::SeqCst) + 1)
        }

        fn record(&self, _span: &Id, _values: &Record<'_>) {}

        fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

        fn event(&self, event: &Event<'_>) {
            let depth = self.0.depth.load(Ordering::SeqCst);
            self.0
                .events
                .lock()
                .expect("lock")
                .push((*event.metadata().level(), depth));
        }

        fn enter(&self, _span: &Id) {
            self.0.depth.fetch_add(1, Ordering::SeqCst);
        }

        fn exit(&self, _span: &Id) {
            self.0.depth.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn response(content_type: &str, body: &'static str) -> Response {
        Response::new(200, HashMap::new(), body).with_header("Content-Type", content_type)
    }

    #[test]
    fn one_span_per_dispatch() {
        let namespace = Namespace::new("api").expect("namespace");
        let mut registry = HandlerRegistry::<Value, Error>::new();
        register_builtin_handlers(&mut registry, &namespace).expect("builtins");
        let dispatcher = Dispatcher::builder(Arc::new(registry))
            .namespace("api")
            .observer(LoggingObserver::debug())
            .build()
            .expect("dispatcher");

        let capture = Capture::default();
        tracing::subscriber::with_default(capture.clone(), || {
            let _ = dispatcher.handle(response("application/json", "[]"), ["text", "json"]);
            let _ = dispatcher.handle(response("text/html", "<p>"), ["json"]);
        });

        check!(*capture.0.spans.lock().expect("lock") == vec!["dispatch", "dispatch"]);

        let events = capture.0.events.lock().expect("lock").clone();
        // started, attempt, declined, attempt, accepted / started, attempt, declined, exhausted
        check!(events.len() == 9);
        check!(events.iter().all(|(_, depth)| *depth == 1));
        check!(events.iter().filter(|(level, _)| *level == Level::WARN).count() == 1);
        check!(capture.0.depth.load(Ordering::SeqCst) == 0);
    }

    #[test]
    fn logging_observer_default() {
        check!(LoggingObserver::new().level() == LogLevel::Info);
    }

    #[test]
    fn logging_observer_debug() {
        check!(LoggingObserver::debug().level() == LogLevel::Debug);
    }
}
