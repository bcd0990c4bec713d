//! HTTP response representation handed to handlers.
//!
//! [`Response`] is a buffered, read-only view of one HTTP response: status,
//! headers, body and (optionally) the URL it was fetched from. Handlers use
//! it to run their recognition test and to decode the payload.
//!
//! # Example
//!
//! ```ignore
//! if response.is_json() {
//!     let user: User = response.json()?;
//! }
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use url::Url;

use crate::MediaType;

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
    url: Option<Url>,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            url: None,
        }
    }

    /// Sets a header, replacing any value with the same (case-insensitive) name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    /// Sets the URL this response was fetched from.
    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name, case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str).or_else(|| {
            self.headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// URL the response was fetched from, if known.
    #[must_use]
    pub const fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Parsed `Content-Type` header.
    #[must_use]
    pub fn media_type(&self) -> Option<MediaType> {
        self.header(http::header::CONTENT_TYPE.as_str())
            .and_then(MediaType::parse)
    }

    /// Media type essence (e.g. `text/html`), without parameters.
    #[must_use]
    pub fn content_type(&self) -> Option<String> {
        self.media_type().map(|media| media.essence().to_string())
    }

    /// `charset` parameter of the content type.
    #[must_use]
    pub fn charset(&self) -> Option<String> {
        self.media_type()
            .and_then(|media| media.param("charset").map(str::to_string))
    }

    /// Content type is JSON (including `+json` suffixes).
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.media_type().is_some_and(|media| media.is_json())
    }

    /// Content type is HTML.
    #[must_use]
    pub fn is_html(&self) -> bool {
        self.media_type().is_some_and(|media| media.is_html())
    }

    /// Content type is form URL-encoded.
    #[must_use]
    pub fn is_form(&self) -> bool {
        self.media_type().is_some_and(|media| media.is_form())
    }

    /// Content type is `text/*`.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.media_type().is_some_and(|media| media.is_text())
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// Deserialize the response body as a URL-encoded form.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn form<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_form(&self.body)
    }

    /// Decode the response body as ordered form key/value pairs.
    #[must_use]
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        crate::form_pairs(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> crate::Result<&str> {
        std::str::from_utf8(&self.body).map_err(Into::into)
    }
}

impl From<http::Response<Bytes>> for Response {
    fn from(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();

        let mut headers: HashMap<String, String> = HashMap::new();
        for (name, value) in &parts.headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }

        Self::new(parts.status.as_u16(), headers, body)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        );

        let response = Response::new(200, headers, r#"{"id":1}"#);

        check!(response.status() == 200);
        check!(response.header("content-type") == Some("application/json; charset=utf-8"));
        check!(response.content_type() == Some("application/json".to_string()));
        check!(response.charset() == Some("utf-8".to_string()));
        check!(response.is_json());
        check!(!response.is_html());
        check!(response.is_success());
        check!(!response.is_empty());
    }

    #[test]
    fn response_status_checks() {
        check!(Response::new(301, HashMap::new(), Bytes::new()).is_redirection());
        check!(Response::new(404, HashMap::new(), Bytes::new()).is_client_error());
        check!(Response::new(500, HashMap::new(), Bytes::new()).is_server_error());
    }

    #[test]
    fn response_without_content_type() {
        let response = Response::new(200, HashMap::new(), "plain");
        check!(response.content_type().is_none());
        check!(!response.is_json());
        check!(!response.is_text());
    }

    #[test]
    fn with_header_replaces_case_insensitively() {
        let response = Response::new(200, HashMap::new(), Bytes::new())
            .with_header("content-type", "text/plain")
            .with_header("Content-Type", "text/html");

        check!(response.headers().len() == 1);
        check!(response.is_html());
    }

    #[test]
    fn response_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            id: u64,
            name: String,
        }

        let response = Response::new(200, HashMap::new(), r#"{"id":1,"name":"test"}"#);

        let user: User = response.json().expect("deserialize");
        check!(
            user == User {
                id: 1,
                name: "test".to_string()
            }
        );
    }

    #[test]
    fn response_text() {
        let response = Response::new(200, HashMap::new(), "Hello, World!");
        check!(response.text().expect("text") == "Hello, World!");

        let response = Response::new(200, HashMap::new(), vec![0xff_u8, 0xfe]);
        let_assert!(Err(crate::Error::InvalidUtf8(_)) = response.text());
    }

    #[test]
    fn response_url() {
        let url = Url::parse("https://portal.example.com/login").expect("url");
        let response = Response::new(200, HashMap::new(), Bytes::new()).with_url(url.clone());
        check!(response.url() == Some(&url));
    }

    #[test]
    fn from_http_response_joins_repeated_headers() {
        let response = http::Response::builder()
            .status(201)
            .header("Content-Type", "text/csv")
            .header("Set-Cookie", "a=1")
            .header("Set-Cookie", "b=2")
            .body(Bytes::from("id,name\n1,alice\n"))
            .expect("http response");

        let response = Response::from(response);
        check!(response.status() == 201);
        check!(response.content_type() == Some("text/csv".to_string()));
        check!(response.header("set-cookie") == Some("a=1, b=2"));
        check!(response.body().as_ref() == b"id,name\n1,alice\n");
    }
}
