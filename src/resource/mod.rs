//! Fetched HTTP resources as seen by the parsers
//!
//! A [`Resource`] is an immutable snapshot of one request/response exchange.
//! The crawler (or the [`crate::fetch`] helpers) builds it once; parsers only
//! ever read from it.

mod content_type;

pub use content_type::{is_html_media_type, is_xml_media_type, media_type};

use url::Url;

/// An immutable view of a fetched HTTP exchange
#[derive(Debug, Clone)]
pub struct Resource {
    url: Url,
    status_code: u16,
    status_line: String,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Resource {
    /// Creates a resource for `url` with the given status and an empty body
    pub fn new(url: Url, status_code: u16) -> Self {
        Self {
            url,
            status_code,
            status_line: format!("HTTP/1.1 {}", status_code),
            content_type: None,
            body: Vec::new(),
        }
    }

    /// Sets the response status line (used for diagnostics only)
    pub fn with_status_line(mut self, status_line: impl Into<String>) -> Self {
        self.status_line = status_line.into();
        self
    }

    /// Sets the raw `Content-Type` header value
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the response body
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// The request URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The request path (no query, no fragment)
    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    /// The raw `Content-Type` header value, parameters included
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The lowercased media type with parameters such as `charset` removed
    pub fn media_type(&self) -> Option<String> {
        self.content_type.as_deref().and_then(media_type)
    }

    /// Returns true if the declared content type is an XML media type
    pub fn is_xml(&self) -> bool {
        self.content_type.as_deref().is_some_and(is_xml_media_type)
    }

    /// Returns true if the declared content type is `text/html` or XHTML
    pub fn is_html(&self) -> bool {
        self.content_type.as_deref().is_some_and(is_html_media_type)
    }

    /// Returns true for 4xx (client error) and 5xx (server error) responses
    pub fn is_error_status(&self) -> bool {
        (400..600).contains(&self.status_code)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns true if the body is empty or only whitespace
    pub fn is_body_blank(&self) -> bool {
        self.body.iter().all(|b| b.is_ascii_whitespace())
    }
}
