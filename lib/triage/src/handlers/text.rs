use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::{Error, FromResponse, Handler, MediaType, Outcome, Response};

/// Returns `text/plain` bodies as a string.
///
/// Only UTF-8 (or unlabelled) bodies are recognized; other charsets decline.
#[derive(Debug, FromResponse)]
pub struct TextHandler<E> {
    response: Arc<Response>,
    _error: PhantomData<fn() -> E>,
}

impl<E: From<Error>> Handler for TextHandler<E> {
    type Output = Value;
    type Error = E;

    fn handle(&self) -> Outcome<Value, E> {
        self.decline_unless(
            self.response.content_type().as_deref() == Some(MediaType::PLAIN_TEXT),
        )?;
        self.decline_unless(self.response.charset().as_deref().is_none_or(is_utf8))?;
        let text = self.response.text().map_err(|err| self.fail(err))?;
        Ok(Value::String(text.to_string()))
    }
}

fn is_utf8(charset: &str) -> bool {
    ["utf-8", "utf8", "us-ascii"]
        .iter()
        .any(|name| charset.eq_ignore_ascii_case(name))
}
