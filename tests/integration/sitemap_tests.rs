//! Sitemap parser behaviour against the fixture documents

use crate::common::{message, message_with_status, message_with_type, sitemap_parser, BASE_DEPTH};
use scraper::Html;
use spider_sitemap::{
    CollectingListener, ListenerRegistry, ParserChain, ParserConfig, SitemapXmlParser,
    SpiderParser,
};
use std::sync::Arc;
use std::thread;
use url::Url;

const ROOT_PATH: &str = "/";

#[test]
fn test_absent_message_cannot_be_handled() {
    let (parser, _) = sitemap_parser();

    assert!(!parser.can_handle(None, ROOT_PATH, false));
    assert!(!parser.can_handle(None, "/sitemap.xml", false));
}

#[test]
fn test_handles_path_ending_with_sitemap_xml() {
    let (parser, _) = sitemap_parser();
    let resource = message("NoUrlsSitemap.xml");

    assert!(parser.can_handle(Some(&resource), "/sitemap.xml", false));
    assert!(!parser.can_handle(Some(&resource), ROOT_PATH, false));
}

#[test]
fn test_handles_message_even_if_already_parsed() {
    let (parser, _) = sitemap_parser();
    let resource = message("NoUrlsSitemap.xml");

    assert!(parser.can_handle(Some(&resource), "/sitemap.xml", true));
}

#[test]
fn test_does_not_parse_absent_message() {
    let (parser, listener) = sitemap_parser();
    let source = Html::parse_document("");

    assert!(!parser.parse(None, Some(&source), BASE_DEPTH).handled);
    assert!(!parser.parse(None, None, BASE_DEPTH).handled);
    assert!(listener.is_empty());
}

#[test]
fn test_does_not_require_source_to_parse_message() {
    let (parser, _) = sitemap_parser();

    assert!(parser.parse(Some(&message("NoUrlsSitemap.xml")), None, BASE_DEPTH).handled);
}

#[test]
fn test_does_not_parse_when_sitemap_parsing_disabled() {
    let parser = SitemapXmlParser::new(ParserConfig {
        parse_sitemap_xml: false,
        ..ParserConfig::default()
    });

    assert!(!parser.parse(Some(&message("NoUrlsSitemap.xml")), None, BASE_DEPTH).handled);
}

#[test]
fn test_does_not_parse_non_xml_message() {
    let (parser, _) = sitemap_parser();
    let resource = message_with_type("text/html", "NoUrlsSitemap.xml");

    assert!(!parser.parse(Some(&resource), None, BASE_DEPTH).handled);
}

#[test]
fn test_does_not_parse_client_error() {
    let (parser, listener) = sitemap_parser();
    let resource = message_with_status(404, "Not Found", "text/xml", "MultipleUrlsSitemap.xml");

    assert!(!parser.parse(Some(&resource), None, BASE_DEPTH).handled);
    assert!(listener.is_empty());
}

#[test]
fn test_does_not_parse_server_error() {
    let (parser, listener) = sitemap_parser();
    let resource = message_with_status(
        500,
        "Internal Server Error",
        "text/xml",
        "MultipleUrlsSitemap.xml",
    );

    assert!(!parser.parse(Some(&resource), None, BASE_DEPTH).handled);
    assert!(listener.is_empty());
}

#[test]
fn test_does_not_parse_empty_message() {
    let (parser, _) = sitemap_parser();

    assert!(!parser.parse(Some(&message("EmptyFile.xml")), None, BASE_DEPTH).handled);
}

#[test]
fn test_does_not_parse_malformed_xml() {
    let (parser, listener) = sitemap_parser();

    assert!(!parser.parse(Some(&message("MalformedSitemap.xml")), None, BASE_DEPTH).handled);
    assert!(listener.is_empty());
}

#[test]
fn test_does_not_parse_xml_with_doctype() {
    let (parser, listener) = sitemap_parser();

    assert!(!parser.parse(Some(&message("DoctypeSitemap.xml")), None, BASE_DEPTH).handled);
    assert!(listener.is_empty());
}

#[test]
fn test_finds_no_urls_when_none_defined() {
    let (parser, listener) = sitemap_parser();

    assert!(parser.parse(Some(&message("NoUrlsSitemap.xml")), None, BASE_DEPTH).handled);
    assert_eq!(listener.len(), 0);
}

#[test]
fn test_finds_no_urls_when_url_has_no_location() {
    let (parser, listener) = sitemap_parser();

    assert!(parser.parse(Some(&message("UrlNoLocationSitemap.xml")), None, BASE_DEPTH).handled);
    assert_eq!(listener.len(), 0);
}

#[test]
fn test_finds_no_urls_when_location_is_empty() {
    let (parser, listener) = sitemap_parser();

    assert!(parser.parse(Some(&message("UrlEmptyLocationSitemap.xml")), None, BASE_DEPTH).handled);
    assert_eq!(listener.len(), 0);
}

#[test]
fn test_finds_urls_in_valid_sitemap() {
    let (parser, listener) = sitemap_parser();

    let outcome = parser.parse(Some(&message("MultipleUrlsSitemap.xml")), None, BASE_DEPTH);

    assert!(outcome.handled);
    assert_eq!(listener.len(), 5);
    assert_eq!(
        listener.urls(),
        vec![
            "https://example.org/",
            "http://subdomain.example.com/",
            "relative",
            "ftp://example.com/",
            "http://www.example.com/%C7",
        ]
    );
    assert!(listener
        .discoveries()
        .iter()
        .all(|d| d.depth() == BASE_DEPTH));
}

#[test]
fn test_relative_location_resolves_against_message_url() {
    let (parser, listener) = sitemap_parser();
    let resource = message("MultipleUrlsSitemap.xml");

    parser.parse(Some(&resource), None, BASE_DEPTH);

    let resolved: Vec<String> = listener
        .discoveries()
        .iter()
        .filter_map(|d| d.resolve(resource.url()))
        .map(|url| url.to_string())
        .collect();
    assert_eq!(
        resolved,
        vec![
            "https://example.org/",
            "http://subdomain.example.com/",
            "http://example.com/relative",
            "ftp://example.com/",
            "http://www.example.com/%C7",
        ]
    );
}

#[test]
fn test_finds_every_location_of_a_url() {
    let (parser, listener) = sitemap_parser();

    let outcome = parser.parse(
        Some(&message("MultipleLocationsPerUrlSitemap.xml")),
        None,
        BASE_DEPTH,
    );

    assert!(outcome.handled);
    assert_eq!(
        listener.urls(),
        vec![
            "https://example.org/first",
            "https://example.org/second",
            "https://example.org/third",
        ]
    );
}

#[test]
fn test_finds_urls_in_sitemap_index() {
    let (parser, listener) = sitemap_parser();

    assert!(parser.parse(Some(&message("SitemapIndex.xml")), None, 2).handled);
    assert_eq!(
        listener.urls(),
        vec![
            "https://example.org/sitemap-posts.xml",
            "https://example.org/sitemap-pages.xml",
        ]
    );
    assert!(listener.discoveries().iter().all(|d| d.depth() == 2));
}

#[test]
fn test_parsing_twice_gives_identical_discoveries() {
    let resource = message("MultipleUrlsSitemap.xml");

    let (first_parser, first) = sitemap_parser();
    let (second_parser, second) = sitemap_parser();
    first_parser.parse(Some(&resource), None, BASE_DEPTH);
    second_parser.parse(Some(&resource), None, BASE_DEPTH);

    assert_eq!(first.discoveries(), second.discoveries());
}

#[test]
fn test_concurrent_parses_notify_every_listener() {
    let (parser, listener) = sitemap_parser();
    let parser = Arc::new(parser);
    let resource = Arc::new(message("MultipleUrlsSitemap.xml"));

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let parser = parser.clone();
            let resource = resource.clone();
            thread::spawn(move || parser.parse(Some(&resource), None, BASE_DEPTH).handled)
        })
        .collect();

    for worker in workers {
        assert!(worker.join().unwrap());
    }
    assert_eq!(listener.len(), 8 * 5);
}

#[test]
fn test_chain_dispatches_sitemap_by_path() {
    let listeners = ListenerRegistry::new();
    let listener = Arc::new(CollectingListener::new());
    listeners.add(listener.clone());
    let chain = ParserChain::with_default_parsers(&ParserConfig::default(), listeners);

    let resource = spider_sitemap::Resource::new(
        Url::parse("http://example.com/sitemap.xml").unwrap(),
        200,
    )
    .with_content_type("application/xml")
    .with_body(crate::common::fixture("MultipleUrlsSitemap.xml"));

    let report = chain.dispatch(&resource, BASE_DEPTH);

    assert_eq!(report.handled_by, vec!["sitemap-xml"]);
    assert_eq!(listener.len(), 5);
}

#[test]
fn test_chain_skips_sitemap_parser_for_other_paths() {
    let listeners = ListenerRegistry::new();
    let listener = Arc::new(CollectingListener::new());
    listeners.add(listener.clone());
    let chain = ParserChain::with_default_parsers(&ParserConfig::default(), listeners);

    // Valid sitemap body, but neither the path nor the content type claims it
    let report = chain.dispatch(&message("MultipleUrlsSitemap.xml"), BASE_DEPTH);

    assert!(!report.is_handled());
    assert!(listener.is_empty());
}
