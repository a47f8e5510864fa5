//! Response values handed back to the hosting layer.
//!
//! A [`Response`] pairs loaded or rendered [`Content`] with ordered
//! [`Headers`]. Responses are built once and never mutated.

use indexmap::IndexMap;
use std::fmt;

/// Ordered header map with case-insensitive lookup.
///
/// Names keep the spelling and position of their first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<String, String>,
}

impl Headers {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    fn key_of(&self, name: &str) -> Option<&String> {
        self.entries.keys().find(|k| k.eq_ignore_ascii_case(name))
    }

    /// Set a header, replacing the value of any existing header with the
    /// same name (ignoring case). Returns the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.key_of(&name).cloned() {
            Some(existing) => self.entries.insert(existing, value),
            None => self.entries.insert(name, value),
        }
    }

    /// Set a header only if no header with that name exists yet.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if !self.contains(&name) {
            self.entries.insert(name, value.into());
        }
    }

    /// Builder-style [`Headers::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get a header value by name (ignoring case).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.key_of(name)
            .and_then(|k| self.entries.get(k))
            .map(|v| v.as_str())
    }

    /// Check if a header is present (ignoring case).
    pub fn contains(&self, name: &str) -> bool {
        self.key_of(name).is_some()
    }

    /// A fresh map holding these headers with `overrides` applied on top.
    pub fn merged(&self, overrides: &Headers) -> Headers {
        let mut merged = self.clone();
        for (name, value) in overrides.iter() {
            merged.insert(name, value);
        }
        merged
    }

    /// Iterate over headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Headers {
    fn from(entries: [(&str, &str); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

/// Response body: rendered text or raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    /// The body as bytes, whatever its kind.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(text) => text.as_bytes(),
            Content::Binary(bytes) => bytes,
        }
    }

    /// The body as text, if it was produced as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Binary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::Binary(bytes)
    }
}

/// Content plus headers, ready for a transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    content: Content,
    headers: Headers,
}

impl Response {
    pub fn new(content: impl Into<Content>, headers: Headers) -> Self {
        Self {
            content: content.into(),
            headers,
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The `content-type` header, in whatever case it was set.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    /// Split into content and headers.
    pub fn into_parts(self) -> (Content, Headers) {
        (self.content, self.headers)
    }
}
