use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::{FromResponse, Handler, Outcome, Response, StatusCode};

/// Accepts successful responses without a body as `null`.
///
/// Redirects and error statuses decline even when their body is empty.
#[derive(Debug, FromResponse)]
pub struct NoContentHandler<E> {
    response: Arc<Response>,
    _error: PhantomData<fn() -> E>,
}

impl<E> Handler for NoContentHandler<E> {
    type Output = Value;
    type Error = E;

    fn handle(&self) -> Outcome<Value, E> {
        let no_content = self.response.status() == StatusCode::NO_CONTENT.as_u16();
        self.decline_unless(
            self.response.is_success() && (no_content || self.response.is_empty()),
        )?;
        Ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert2::{check, let_assert};

    use super::*;
    use crate::Rejection;

    fn handler(status: u16, body: &'static str) -> NoContentHandler<()> {
        NoContentHandler::from_response(Arc::new(Response::new(status, HashMap::new(), body)))
    }

    fn redirect(location: &str) -> NoContentHandler<()> {
        NoContentHandler::from_response(Arc::new(
            Response::new(302, HashMap::new(), "").with_header("Location", location),
        ))
    }

    #[test]
    fn accepts_no_content() {
        check!(handler(204, "").handle() == Ok(Value::Null));
        check!(handler(200, "").handle() == Ok(Value::Null));
    }

    #[test]
    fn declines_bodies() {
        let_assert!(Err(Rejection::Declined) = handler(200, "data").handle());
    }

    #[test]
    fn declines_empty_redirects_and_errors() {
        let_assert!(Err(Rejection::Declined) = redirect("/login").handle());
        let_assert!(Err(Rejection::Declined) = handler(500, "").handle());
        let_assert!(Err(Rejection::Declined) = handler(404, "").handle());
    }
}
