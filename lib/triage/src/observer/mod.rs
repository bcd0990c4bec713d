//! Bundled dispatch observers.
//!
//! | Observer | Feature | Description |
//! |----------|---------|-------------|
//! | [`LoggingObserver`] | - | `tracing` events for each dispatch |
//! | [`MetricsObserver`] | `metrics` | Counters through the `metrics` facade |
//!
//! Custom observers implement [`DispatchObserver`](crate::DispatchObserver)
//! and are added with
//! [`DispatcherBuilder::observer`](crate::DispatcherBuilder::observer).

mod logging;
#[cfg(feature = "metrics")]
mod metrics;

pub use logging::{LogLevel, LoggingObserver};
#[cfg(feature = "metrics")]
pub use metrics::MetricsObserver;
