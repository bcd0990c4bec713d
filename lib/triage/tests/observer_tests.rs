//! Tests for the bundled observers.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use assert2::{check, let_assert};
use triage::observer::{LogLevel, LoggingObserver};
use triage::prelude::*;
use triage::Trial;

/// Records observer callbacks as strings.
#[derive(Debug, Default)]
struct Recorder(Mutex<Vec<String>>);

impl Recorder {
    fn push(&self, event: String) {
        self.0.lock().expect("recorder lock").push(event);
    }

    fn events(&self) -> Vec<String> {
        self.0.lock().expect("recorder lock").clone()
    }
}

impl DispatchObserver for Recorder {
    fn started(&self, namespace: &Namespace, _response: &Response, trials: usize) {
        self.push(format!("started {namespace} {trials}"));
    }

    fn attempt(&self, trial: &Trial<'_>) {
        self.push(format!("attempt {}@{}", trial.handler, trial.position));
    }

    fn declined(&self, trial: &Trial<'_>) {
        self.push(format!("declined {}", trial.handler));
    }

    fn accepted(&self, trial: &Trial<'_>) {
        self.push(format!("accepted {}", trial.handler));
    }

    fn failed(&self, trial: &Trial<'_>) {
        self.push(format!("failed {}", trial.handler));
    }

    fn exhausted(&self, _namespace: &Namespace, response: &Response, trials: usize) {
        self.push(format!("exhausted {} {trials}", response.status()));
    }
}

fn registry() -> Arc<HandlerRegistry<Value, Error>> {
    let namespace = Namespace::new("api").expect("namespace");
    let mut registry = HandlerRegistry::new();
    register_builtin_handlers(&mut registry, &namespace).expect("builtins");
    Arc::new(registry)
}

fn json(body: &'static str) -> Response {
    Response::new(200, HashMap::new(), body).with_header("Content-Type", "application/json")
}

#[test]
fn observers_are_notified_in_order() {
    let recorder = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::builder(registry())
        .namespace("api")
        .observer(Arc::clone(&recorder))
        .build()
        .expect("dispatcher");

    let _ = dispatcher.handle(json("[1]"), ["text", "json"]);

    check!(
        recorder.events()
            == vec![
                "started api 2",
                "attempt text@0",
                "declined text",
                "attempt json@1",
                "accepted json",
            ]
    );
}

#[test]
fn exhaustion_and_failure_are_reported() {
    let recorder = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::builder(registry())
        .namespace("api")
        .observer(Arc::clone(&recorder))
        .build()
        .expect("dispatcher");

    let _ = dispatcher.handle(json("nope"), ["json"]);
    let _ = dispatcher.handle(
        Response::new(404, HashMap::new(), "gone").with_header("Content-Type", "text/html"),
        ["text"],
    );

    check!(
        recorder.events()
            == vec![
                "started api 1",
                "attempt json@0",
                "failed json",
                "started api 1",
                "attempt text@0",
                "declined text",
                "exhausted 404 1",
            ]
    );
}

#[test]
fn unknown_handler_notifies_nobody() {
    let recorder = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::builder(registry())
        .namespace("api")
        .observer(Arc::clone(&recorder))
        .build()
        .expect("dispatcher");

    let_assert!(Err(DispatchError::Config(_)) = dispatcher.handle(json("[]"), ["json", "csv"]));
    check!(recorder.events().is_empty());
}

#[test]
fn logging_does_not_change_outcomes() {
    let dispatcher = Dispatcher::builder(registry())
        .namespace("api")
        .with_logging()
        .with_debug_logging()
        .observer(LoggingObserver::new())
        .build()
        .expect("dispatcher");

    check!(dispatcher.handle(json("{}"), ["json"]).is_ok());
    check!(dispatcher.handle(json("{"), ["json"]).is_err());
    check!(dispatcher.handle_default(json("{}")).is_err());
    check!(LoggingObserver::debug().level() == LogLevel::Debug);
}

#[cfg(feature = "metrics")]
#[test]
fn metrics_do_not_change_outcomes() {
    let dispatcher = Dispatcher::builder(registry())
        .namespace("api")
        .with_metrics()
        .build()
        .expect("dispatcher");

    check!(dispatcher.handle(json("{}"), ["text", "json"]).is_ok());
    check!(dispatcher.handle(json("{"), ["json"]).is_err());
}
