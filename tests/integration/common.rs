//! Helpers shared by the integration tests

use spider_sitemap::{CollectingListener, ParserConfig, Resource, SitemapXmlParser, SpiderParser};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

pub const BASE_DEPTH: u32 = 0;

/// Reads a fixture from `tests/fixtures/sitemapxml`
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/sitemapxml")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// A response to `GET http://example.com/` carrying the given fixture
pub fn message_with_status(status: u16, reason: &str, content_type: &str, name: &str) -> Resource {
    Resource::new(Url::parse("http://example.com/").unwrap(), status)
        .with_status_line(format!("HTTP/1.1 {} {}", status, reason))
        .with_content_type(format!("{}; charset=UTF-8", content_type))
        .with_body(fixture(name))
}

pub fn message_with_type(content_type: &str, name: &str) -> Resource {
    message_with_status(200, "OK", content_type, name)
}

pub fn message(name: &str) -> Resource {
    message_with_type("text/xml", name)
}

/// A sitemap parser with sitemap parsing enabled and a collecting listener
pub fn sitemap_parser() -> (SitemapXmlParser, Arc<CollectingListener>) {
    let parser = SitemapXmlParser::new(ParserConfig {
        parse_sitemap_xml: true,
        ..ParserConfig::default()
    });
    let listener = Arc::new(CollectingListener::new());
    parser.listeners().add(listener.clone());
    (parser, listener)
}
