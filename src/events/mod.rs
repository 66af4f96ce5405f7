//! Discovery events emitted by the parsers
//!
//! Parsers report every URL they find as a [`Discovery`] through a
//! [`ListenerRegistry`]. The registry is owned by the spider session and
//! handed to each parser it builds; there is no global registry.

mod listener;
mod registry;

pub use listener::{CollectingListener, ParserListener};
pub use registry::ListenerRegistry;

use url::Url;

/// One URL found while parsing a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Discovery {
    url: String,
    depth: u32,
}

impl Discovery {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    /// The location exactly as it appeared in the resource
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Crawl depth of the resource the URL was found in
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Resolves the location against the URL of the resource it came from
    ///
    /// Absolute locations are returned as-is, relative ones are joined onto
    /// `base`. Returns None when the text cannot be turned into a URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use spider_sitemap::Discovery;
    /// use url::Url;
    ///
    /// let base = Url::parse("http://example.com/sitemap.xml").unwrap();
    /// let found = Discovery::new("relative", 0);
    /// assert_eq!(found.resolve(&base).unwrap().as_str(), "http://example.com/relative");
    /// ```
    pub fn resolve(&self, base: &Url) -> Option<Url> {
        base.join(self.url.trim()).ok()
    }
}
