//! Normalized response types.
//!
//! # Design
//! One HTTP call produces one `Response`: the reconstructed status line, the
//! numeric code, every response header with multi-value order preserved, and
//! the fully read body bytes. All fields are plain owned data; the value is
//! handed to the caller and never shared with the sender afterwards.

use std::collections::HashMap;

/// Response headers: lowercase name to ordered list of values.
///
/// HTTP allows the same header name to appear multiple times; `append` keeps
/// every value in arrival order. Names are normalized to lowercase on insert
/// and on lookup, so access is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: HashMap<String, Vec<String>>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `name`, keeping any values already present.
    pub fn append(&mut self, name: &str, value: &str) {
        self.entries
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.to_string());
    }

    /// First value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values for `name`, in arrival order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, values)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

/// Outcome of one successfully transported HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status line, e.g. `"404 Not Found"`.
    pub status: String,
    /// Numeric status code.
    pub code: u16,
    /// Response headers with multi-value semantics preserved.
    pub headers: Headers,
    /// Body, fully read into memory.
    pub body: Vec<u8>,
}

impl Response {
    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
