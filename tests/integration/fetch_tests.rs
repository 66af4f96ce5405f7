//! Fetch-then-parse tests against a wiremock server

use crate::common::{fixture, BASE_DEPTH};
use spider_sitemap::config::FetchConfig;
use spider_sitemap::fetch::{build_http_client, fetch_resource};
use spider_sitemap::{CollectingListener, ListenerRegistry, ParserChain, ParserConfig, SpiderError};
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MAX_BODY: usize = 1024 * 1024;

fn chain() -> (ParserChain, Arc<CollectingListener>) {
    let listeners = ListenerRegistry::new();
    let listener = Arc::new(CollectingListener::new());
    listeners.add(listener.clone());
    (
        ParserChain::with_default_parsers(&ParserConfig::default(), listeners)
            .with_max_body_size(MAX_BODY),
        listener,
    )
}

async fn serve(server: &MockServer, route: &str, status: u16, content_type: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body, content_type))
        .mount(server)
        .await;
}

fn url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).unwrap()
}

#[tokio::test]
async fn test_fetch_and_parse_sitemap() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/sitemap.xml",
        200,
        "application/xml; charset=UTF-8",
        fixture("MultipleUrlsSitemap.xml"),
    )
    .await;

    let client = build_http_client(&FetchConfig::default()).unwrap();
    let sitemap_url = url(&server, "/sitemap.xml");
    let resource = fetch_resource(&client, &sitemap_url, MAX_BODY).await.unwrap();

    assert_eq!(resource.status_code(), 200);
    assert!(resource.status_line().contains("200"));
    assert!(resource.is_xml());
    assert_eq!(resource.path(), "/sitemap.xml");

    let (chain, listener) = chain();
    let report = chain.dispatch(&resource, BASE_DEPTH);

    assert_eq!(report.handled_by, vec!["sitemap-xml"]);
    assert_eq!(listener.len(), 5);

    let relative = listener
        .discoveries()
        .into_iter()
        .find(|d| d.url() == "relative")
        .unwrap();
    assert_eq!(
        relative.resolve(resource.url()).unwrap(),
        url(&server, "/relative")
    );
}

#[tokio::test]
async fn test_missing_sitemap_is_not_parsed() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/sitemap.xml",
        404,
        "text/xml",
        fixture("MultipleUrlsSitemap.xml"),
    )
    .await;

    let client = build_http_client(&FetchConfig::default()).unwrap();
    let resource = fetch_resource(&client, &url(&server, "/sitemap.xml"), MAX_BODY)
        .await
        .unwrap();

    assert_eq!(resource.status_code(), 404);
    assert!(resource.is_xml());

    let (chain, listener) = chain();
    assert!(!chain.dispatch(&resource, BASE_DEPTH).is_handled());
    assert!(listener.is_empty());
}

#[tokio::test]
async fn test_html_page_goes_to_link_parser() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        200,
        "text/html",
        r#"<html><body><a href="/sitemap.xml">Sitemap</a></body></html>"#.to_string(),
    )
    .await;

    let client = build_http_client(&FetchConfig::default()).unwrap();
    let resource = fetch_resource(&client, &url(&server, "/"), MAX_BODY)
        .await
        .unwrap();

    let (chain, listener) = chain();
    let report = chain.dispatch(&resource, 1);

    assert_eq!(report.handled_by, vec!["html-links"]);
    assert_eq!(listener.urls(), vec![url(&server, "/sitemap.xml").to_string()]);
    assert_eq!(listener.discoveries()[0].depth(), 1);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/sitemap.xml",
        200,
        "text/xml",
        fixture("MultipleUrlsSitemap.xml"),
    )
    .await;

    let client = build_http_client(&FetchConfig::default()).unwrap();
    let result = fetch_resource(&client, &url(&server, "/sitemap.xml"), 64).await;

    assert!(matches!(
        result,
        Err(SpiderError::BodyTooLarge { limit: 64, .. })
    ));
}
