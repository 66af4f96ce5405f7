//! Sitemap parser
//!
//! Reports the `<loc>` of every entry in a sitemap (`<urlset>` of `<url>`)
//! or sitemap index (`<sitemapindex>` of `<sitemap>`) document.
//!
//! A resource is declined, in this order, when:
//! 1. it is absent
//! 2. sitemap parsing is disabled
//! 3. its content type is not XML
//! 4. its status is a client or server error
//! 5. its body is empty or blank
//! 6. its body is not well-formed XML
//! 7. its body declares a DOCTYPE
//!
//! The body is not looked at until checks 1-4 pass. Entries without a
//! location, or with a blank one, are skipped.

use super::classifier::is_sitemap_resource;
use super::{ParseOutcome, SpiderParser};
use crate::config::ParserConfig;
use crate::events::{Discovery, ListenerRegistry};
use crate::resource::Resource;
use crate::xml::{parse_document, Document, XmlError};
use scraper::Html;

/// Root element name and entry element name of each sitemap flavour
const ENTRY_KINDS: [(&str, &str); 2] = [("urlset", "url"), ("sitemapindex", "sitemap")];

/// Name of the location child of an entry
const LOCATION: &str = "loc";

/// Parser for `sitemap.xml` documents
#[derive(Debug, Clone)]
pub struct SitemapXmlParser {
    config: ParserConfig,
    listeners: ListenerRegistry,
}

impl SitemapXmlParser {
    /// Creates a parser with its own, empty listener registry
    pub fn new(config: ParserConfig) -> Self {
        Self::with_listeners(config, ListenerRegistry::new())
    }

    /// Creates a parser that notifies the given (shared) registry
    pub fn with_listeners(config: ParserConfig, listeners: ListenerRegistry) -> Self {
        Self { config, listeners }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Runs checks 1-7 and returns the parsed document if they all pass
    fn accept(&self, resource: Option<&Resource>) -> Option<Document> {
        let resource = resource?;

        if !self.config.parse_sitemap_xml {
            tracing::debug!("Sitemap parsing disabled, skipping {}", resource.url());
            return None;
        }

        if !resource.is_xml() {
            tracing::debug!(
                "Not parsing {} as a sitemap, content type {:?} is not XML",
                resource.url(),
                resource.content_type()
            );
            return None;
        }

        if resource.is_error_status() {
            tracing::debug!(
                "Not parsing {} as a sitemap, response was {}",
                resource.url(),
                resource.status_line()
            );
            return None;
        }

        if resource.is_body_blank() {
            tracing::debug!("Not parsing {} as a sitemap, body is empty", resource.url());
            return None;
        }

        match parse_document(resource.body()) {
            Ok(document) => Some(document),
            Err(XmlError::Doctype) => {
                tracing::debug!(
                    "Refusing to parse sitemap {}, it declares a DOCTYPE",
                    resource.url()
                );
                None
            }
            Err(e) => {
                tracing::debug!("Failed to parse sitemap {}: {}", resource.url(), e);
                None
            }
        }
    }
}

impl SpiderParser for SitemapXmlParser {
    fn name(&self) -> &'static str {
        "sitemap-xml"
    }

    fn can_handle(
        &self,
        resource: Option<&Resource>,
        path: &str,
        already_handled: bool,
    ) -> bool {
        is_sitemap_resource(resource, path, already_handled)
    }

    /// Parses the raw body; `document` is never used, an HTML view of the
    /// body says nothing about its XML.
    fn parse(
        &self,
        resource: Option<&Resource>,
        _document: Option<&Html>,
        depth: u32,
    ) -> ParseOutcome {
        let Some(document) = self.accept(resource) else {
            return ParseOutcome::DECLINED;
        };

        let locations = extract_locations(&document);
        if let Some(resource) = resource {
            tracing::debug!(
                "Found {} URLs in sitemap {}",
                locations.len(),
                resource.url()
            );
        }

        for location in locations {
            self.listeners.notify(&Discovery::new(location, depth));
        }

        ParseOutcome::HANDLED
    }

    fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }
}

/// Collects the entry locations of a sitemap document, in document order
///
/// Every `<loc>` child of an entry is reported, so an entry listing two
/// locations yields both. Surrounding whitespace is trimmed, nothing else is
/// touched: relative locations and any scheme are kept as written. A document
/// whose root is not `urlset` or `sitemapindex` has no entries.
pub fn extract_locations(document: &Document) -> Vec<String> {
    let root = document.root();

    let Some(entry_name) = ENTRY_KINDS
        .iter()
        .find(|(root_name, _)| *root_name == root.name())
        .map(|(_, entry_name)| *entry_name)
    else {
        tracing::trace!("Root element <{}> is not a sitemap root", root.name());
        return Vec::new();
    };

    let mut locations = Vec::new();
    for entry in root.elements().filter(|entry| entry.name() == entry_name) {
        let mut found = false;
        for loc in entry.elements().filter(|child| child.name() == LOCATION) {
            found = true;
            let text = loc.text();
            let location = text.trim();
            if location.is_empty() {
                tracing::trace!("Skipping empty location in <{}> entry", entry_name);
            } else {
                locations.push(location.to_string());
            }
        }
        if !found {
            tracing::trace!("Skipping <{}> entry without a location", entry_name);
        }
    }

    locations
}
