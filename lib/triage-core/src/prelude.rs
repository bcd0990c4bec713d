//! Prelude module for convenient imports.
//!
//! ```ignore
//! use triage_core::prelude::*;
//! ```

pub use crate::{
    Declined, DispatchError, Dispatcher, DispatcherConfig, Error, FromResponse, Handler,
    HandlerRegistry, Namespace, Outcome, Rejection, Response, Result, UnexpectedResponse,
};
