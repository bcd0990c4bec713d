use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{Error, FromResponse, Handler, Outcome, Response};

/// Decodes form URL-encoded bodies into an object.
///
/// A key seen once maps to a string, a repeated key to an array of strings.
#[derive(Debug, FromResponse)]
pub struct FormHandler<E> {
    response: Arc<Response>,
    _error: PhantomData<fn() -> E>,
}

impl<E: From<Error>> Handler for FormHandler<E> {
    type Output = Value;
    type Error = E;

    fn handle(&self) -> Outcome<Value, E> {
        self.decline_unless(self.response.is_form())?;

        let mut fields = Map::new();
        for (key, value) in self.response.form_pairs() {
            match fields.get_mut(&key) {
                Some(Value::Array(values)) => values.push(Value::String(value)),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(value)]);
                }
                None => {
                    fields.insert(key, Value::String(value));
                }
            }
        }
        Ok(Value::Object(fields))
    }
}
