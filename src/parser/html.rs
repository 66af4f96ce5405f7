//! HTML link parser
//!
//! This parser handles HTML pages and reports:
//! - Links to follow (from <a> tags and canonical links)
//!
//! Links are resolved against the page URL before they are reported.

use super::{ParseOutcome, SpiderParser};
use crate::config::ParserConfig;
use crate::events::{Discovery, ListenerRegistry};
use crate::resource::Resource;
use scraper::{Html, Selector};
use url::Url;

/// Parser for HTML pages
#[derive(Debug, Clone)]
pub struct HtmlLinkParser {
    config: ParserConfig,
    listeners: ListenerRegistry,
}

impl HtmlLinkParser {
    /// Creates a parser with its own, empty listener registry
    pub fn new(config: ParserConfig) -> Self {
        Self::with_listeners(config, ListenerRegistry::new())
    }

    /// Creates a parser that notifies the given (shared) registry
    pub fn with_listeners(config: ParserConfig, listeners: ListenerRegistry) -> Self {
        Self { config, listeners }
    }
}

impl SpiderParser for HtmlLinkParser {
    fn name(&self) -> &'static str {
        "html-links"
    }

    fn can_handle(
        &self,
        resource: Option<&Resource>,
        _path: &str,
        already_handled: bool,
    ) -> bool {
        !already_handled && resource.is_some_and(Resource::is_html)
    }

    fn parse(
        &self,
        resource: Option<&Resource>,
        document: Option<&Html>,
        depth: u32,
    ) -> ParseOutcome {
        let Some(resource) = resource else {
            return ParseOutcome::DECLINED;
        };

        if !self.config.parse_html {
            tracing::debug!("HTML parsing disabled, skipping {}", resource.url());
            return ParseOutcome::DECLINED;
        }

        if !resource.is_html() || resource.is_error_status() {
            return ParseOutcome::DECLINED;
        }

        let links = match document {
            Some(document) => extract_links(document, resource.url()),
            None => {
                let html = String::from_utf8_lossy(resource.body());
                extract_links(&Html::parse_document(&html), resource.url())
            }
        };
        tracing::debug!("Found {} links in {}", links.len(), resource.url());

        for link in links {
            self.listeners.notify(&Discovery::new(link, depth));
        }

        ParseOutcome::HANDLED
    }

    fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }
}

/// Extracts all valid links from the HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags
/// - `<link rel="canonical" href="...">`
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use spider_sitemap::parser::extract_links;
/// use url::Url;
///
/// let html = Html::parse_document(r#"<html><body><a href="/page">Link</a></body></html>"#);
/// let base_url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(extract_links(&html, &base_url), vec!["https://example.com/page"]);
/// ```
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    // Extract links from <a> tags
    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    // Extract canonical link
    if let Ok(canonical_selector) = Selector::parse("link[rel='canonical'][href]") {
        for element in document.select(&canonical_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    base_url.join(href).ok().map(|url| url.to_string())
}
