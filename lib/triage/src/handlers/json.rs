use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::{Error, FromResponse, Handler, Outcome, Response};

/// Decodes JSON bodies.
///
/// Declines any other content type. A JSON content type with a malformed
/// body is recognized but unacceptable: it raises
/// [`Error::JsonDeserialization`] converted into `E`.
#[derive(Debug, FromResponse)]
pub struct JsonHandler<E> {
    response: Arc<Response>,
    _error: PhantomData<fn() -> E>,
}

impl<E: From<Error>> Handler for JsonHandler<E> {
    type Output = Value;
    type Error = E;

    fn handle(&self) -> Outcome<Value, E> {
        self.decline_unless(self.response.is_json())?;
        self.response.json().map_err(|err| self.fail(err))
    }
}
