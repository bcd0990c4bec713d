//! Body decoding utilities.

use crate::Result;

/// A parsed `Content-Type` header value.
///
/// The essence (`type/subtype`) is lower-cased; parameters keep their value
/// as written, minus surrounding quotes.
///
/// # Example
///
/// ```
/// use triage_core::MediaType;
///
/// let media = MediaType::parse("Text/HTML; charset=\"UTF-8\"").expect("media type");
/// assert_eq!(media.essence(), "text/html");
/// assert_eq!(media.param("charset"), Some("UTF-8"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    essence: String,
    params: Vec<(String, String)>,
}

impl MediaType {
    /// JSON media type.
    pub const JSON: &'static str = "application/json";
    /// Form URL-encoded media type.
    pub const FORM: &'static str = "application/x-www-form-urlencoded";
    /// HTML media type.
    pub const HTML: &'static str = "text/html";
    /// Plain text media type.
    pub const PLAIN_TEXT: &'static str = "text/plain";

    /// Parse a header value. Returns `None` if there is no `type/subtype` pair.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(';');
        let essence = parts.next()?.trim().to_ascii_lowercase();
        let (kind, subtype) = essence.split_once('/')?;
        if kind.is_empty() || subtype.is_empty() {
            return None;
        }

        let params = parts
            .filter_map(|param| {
                let (name, value) = param.split_once('=')?;
                let name = name.trim().to_ascii_lowercase();
                let value = value.trim().trim_matches('"').to_string();
                (!name.is_empty()).then_some((name, value))
            })
            .collect();

        Some(Self { essence, params })
    }

    /// The `type/subtype` part, lower-cased.
    #[must_use]
    pub fn essence(&self) -> &str {
        &self.essence
    }

    /// A parameter value by (case-insensitive) name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// `application/json` or any `+json` structured syntax suffix.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.essence == Self::JSON || self.essence.ends_with("+json")
    }

    /// `text/html` or `application/xhtml+xml`.
    #[must_use]
    pub fn is_html(&self) -> bool {
        self.essence == Self::HTML || self.essence == "application/xhtml+xml"
    }

    /// `application/x-www-form-urlencoded`.
    #[must_use]
    pub fn is_form(&self) -> bool {
        self.essence == Self::FORM
    }

    /// Any `text/*` type.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.essence.starts_with("text/")
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.essence)
    }
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the exact field that failed
/// (e.g., "user.address.city").
///
/// # Example
///
/// ```
/// use triage_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let bytes = br#"{"name":"Alice"}"#;
/// let user: User = from_json(bytes).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Deserialize form URL-encoded bytes.
///
/// Uses `serde_html_form`, so `Vec<T>` fields collect repeated keys
/// (e.g., `tag=a&tag=b`).
///
/// # Example
///
/// ```
/// use triage_core::from_form;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Login { username: String }
///
/// let login: Login = from_form(b"username=alice").expect("deserialize");
/// assert_eq!(login, Login { username: "alice".to_string() });
/// ```
pub fn from_form<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_html_form::from_bytes(bytes).map_err(Into::into)
}

/// Decode form URL-encoded bytes into ordered key/value pairs.
///
/// Unlike [`from_form`], this never fails and keeps repeated keys in order.
///
/// # Example
///
/// ```
/// use triage_core::form_pairs;
///
/// let pairs = form_pairs(b"tag=a&q=rust+http&tag=b");
/// assert_eq!(pairs[1], ("q".to_string(), "rust http".to_string()));
/// ```
#[must_use]
pub fn form_pairs(bytes: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(bytes).into_owned().collect()
}
