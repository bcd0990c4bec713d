//! Handler namespaces.

use std::fmt;

use crate::{Error, Result};

const SEPARATOR: &str = "::";

/// Prefix resolving short handler identifiers to registered handlers.
///
/// A namespace is a `::`-separated path of identifier-like segments
/// (`portal`, `portal::v2`, `billing-api::responses`).
///
/// # Example
///
/// ```
/// use triage_core::Namespace;
///
/// let namespace = Namespace::new("portal::responses").expect("namespace");
/// assert_eq!(namespace.qualify("login_page"), "portal::responses::login_page");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Create a validated namespace.
    pub fn new(namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        if is_valid_path(&namespace) {
            Ok(Self(namespace))
        } else {
            Err(Error::invalid_namespace(namespace))
        }
    }

    /// The namespace string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully qualified name for a short handler identifier.
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        format!("{}{SEPARATOR}{name}", self.0)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate a short handler identifier (may itself contain `::` segments).
pub(crate) fn validate_handler_name(name: &str) -> Result<()> {
    if is_valid_path(name) {
        Ok(())
    } else {
        Err(Error::invalid_handler_name(name))
    }
}

fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path.split(SEPARATOR).all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn namespace_qualify() {
        let namespace = Namespace::new("portal").expect("namespace");
        check!(namespace.qualify("csv") == "portal::csv");
        check!(namespace.qualify("errors::login") == "portal::errors::login");
        check!(namespace.to_string() == "portal");
    }

    #[test]
    fn namespace_rejects_malformed() {
        for bad in ["", "portal::", "::portal", "por tal", "portal:::csv", "portal::::csv"] {
            let_assert!(Err(Error::InvalidNamespace(value)) = Namespace::new(bad));
            check!(value == bad);
        }
    }

    #[test]
    fn handler_name_validation() {
        check!(validate_handler_name("login_page").is_ok());
        check!(validate_handler_name("errors::not-found").is_ok());
        check!(validate_handler_name("").is_err());
        check!(validate_handler_name("bad name").is_err());
    }
}
