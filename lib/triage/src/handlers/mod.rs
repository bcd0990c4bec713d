//! Built-in handlers for common response shapes.
//!
//! All built-ins produce a [`serde_json::Value`] and raise the caller's
//! domain error type `E`, which must be constructible from [`crate::Error`]
//! (for bodies that claim a shape but fail to decode).
//!
//! | Name | Handler | Recognizes |
//! |------|---------|------------|
//! | `json` | [`JsonHandler`] | `application/json`, `*+json` |
//! | `form` | [`FormHandler`] | `application/x-www-form-urlencoded` |
//! | `text` | [`TextHandler`] | `text/plain`, UTF-8 only |
//! | `no_content` | [`NoContentHandler`] | 2xx with status 204 or an empty body |

mod form;
mod json;
mod no_content;
mod text;

pub use form::FormHandler;
pub use json::JsonHandler;
pub use no_content::NoContentHandler;
pub use text::TextHandler;

use serde_json::Value;

use crate::{Error, HandlerRegistry, Namespace, Result};

/// Register the built-in handlers under `namespace`.
///
/// They are registered as `json`, `form`, `text` and `no_content`.
///
/// # Example
///
/// ```ignore
/// let namespace = Namespace::new("portal")?;
/// let mut registry = HandlerRegistry::<Value, PortalError>::new();
/// register_builtin_handlers(&mut registry, &namespace)?;
/// ```
pub fn register_builtin_handlers<E>(
    registry: &mut HandlerRegistry<Value, E>,
    namespace: &Namespace,
) -> Result<()>
where
    E: From<Error> + 'static,
{
    registry
        .register::<JsonHandler<E>>(namespace.qualify("json"))?
        .register::<FormHandler<E>>(namespace.qualify("form"))?
        .register::<TextHandler<E>>(namespace.qualify("text"))?
        .register::<NoContentHandler<E>>(namespace.qualify("no_content"))?;
    Ok(())
}
