//! Dispatcher configuration types.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for a [`Dispatcher`](crate::Dispatcher).
///
/// Can be deserialized, e.g. from a JSON settings file:
///
/// ```
/// use triage_core::DispatcherConfig;
///
/// let config = DispatcherConfig::from_json(br#"{
///     "namespace": "portal",
///     "default_handlers": ["login_page", "error_page"]
/// }"#).expect("config");
///
/// assert_eq!(config.namespace.as_deref(), Some("portal"));
/// assert_eq!(config.default_handlers, ["login_page", "error_page"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Namespace used to resolve short handler identifiers. Required.
    pub namespace: Option<String>,
    /// Handlers tried after the call-supplied ones, in order.
    #[serde(default)]
    pub default_handlers: Vec<String>,
}

impl DispatcherConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> DispatcherConfigBuilder {
        DispatcherConfigBuilder::default()
    }

    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error (with the offending path) if the JSON is malformed.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        crate::from_json(bytes)
    }
}

/// Builder for [`DispatcherConfig`].
#[derive(Debug, Clone, Default)]
pub struct DispatcherConfigBuilder {
    namespace: Option<String>,
    default_handlers: Vec<String>,
}

impl DispatcherConfigBuilder {
    /// Set the handler namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Append a default handler.
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

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingNamespace`] if no namespace was set.
    pub fn build(self) -> Result<DispatcherConfig> {
        if self.namespace.is_none() {
            return Err(Error::MissingNamespace);
        }
        Ok(DispatcherConfig {
            namespace: self.namespace,
            default_handlers: self.default_handlers,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn default_config() {
        let config = DispatcherConfig::default();
        check!(config.namespace.is_none());
        check!(config.default_handlers.is_empty());
    }

    #[test]
    fn builder_overrides() {
        let config = DispatcherConfig::builder()
            .namespace("portal")
            .default_handler("login_page")
            .default_handlers(["error_page", "login_page"])
            .build()
            .expect("config");

        check!(config.namespace.as_deref() == Some("portal"));
        check!(config.default_handlers == ["login_page", "error_page", "login_page"]);
    }

    #[test]
    fn builder_requires_namespace() {
        let_assert!(Err(Error::MissingNamespace) = DispatcherConfig::builder().build());
    }

    #[test]
    fn from_json_defaults_and_errors() {
        let config = DispatcherConfig::from_json(br#"{"namespace":"portal"}"#).expect("config");
        check!(config.default_handlers.is_empty());

        let_assert!(
            Err(Error::JsonDeserialization { path, .. }) =
                DispatcherConfig::from_json(br#"{"namespace":"portal","default_handlers":[1]}"#)
        );
        check!(path == "default_handlers[0]");
    }
}
