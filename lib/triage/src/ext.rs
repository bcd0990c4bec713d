//! Observer shortcuts on [`DispatcherBuilder`].

use crate::DispatcherBuilder;
#[cfg(feature = "metrics")]
use crate::observer::MetricsObserver;
use crate::observer::LoggingObserver;

/// Extension methods adding the bundled observers.
///
/// # Example
///
/// ```ignore
/// use triage::DispatcherBuilderExt;
///
/// let dispatcher = Dispatcher::builder(registry)
///     .namespace("portal")
///     .with_logging()
///     .build()?;
/// ```
pub trait DispatcherBuilderExt: Sized {
    /// Log dispatch summaries at info level.
    #[must_use]
    fn with_logging(self) -> Self;

    /// Log every handler attempt at debug level.
    #[must_use]
    fn with_debug_logging(self) -> Self;

    /// Record dispatch counters through the `metrics` facade.
    #[cfg(feature = "metrics")]
    #[must_use]
    fn with_metrics(self) -> Self;
}

impl<T, E, F> DispatcherBuilderExt for DispatcherBuilder<T, E, F> {
    fn with_logging(self) -> Self {
        self.observer(LoggingObserver::new())
    }

    fn with_debug_logging(self) -> Self {
        self.observer(LoggingObserver::debug())
    }

    #[cfg(feature = "metrics")]
    fn with_metrics(self) -> Self {
        self.observer(MetricsObserver::new())
    }
}
