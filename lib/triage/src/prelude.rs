//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, traits and the
//! derive macro for easy glob importing:
//!
//! ```ignore
//! use triage::prelude::*;
//! ```

pub use std::sync::Arc;

pub use crate::{
    Declined, DispatchError, DispatchObserver, Dispatcher, DispatcherBuilderExt,
    DispatcherConfig, Error, FromResponse, Handler, HandlerRegistry, Namespace, Outcome,
    Rejection, Response, Result, StatusCode, UnexpectedResponse, register_builtin_handlers,
};
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value;
