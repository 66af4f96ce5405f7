//! HTTP fetcher
//!
//! Turns a URL into a [`Resource`] for the parsers:
//! - Building HTTP clients with the configured user agent and timeout
//! - GET requests capturing status, content type and body
//! - Enforcing the body size limit before anything is parsed
//!
//! Fetching never interprets the response; an error status still produces a
//! resource, and the parsers decide what to do with it.

use crate::config::FetchConfig;
use crate::resource::Resource;
use crate::SpiderError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use spider_sitemap::config::FetchConfig;
/// use spider_sitemap::fetch::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL into a [`Resource`]
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `max_body_size` - Largest accepted body, in bytes
///
/// # Returns
///
/// * `Ok(Resource)` - The response, whatever its status
/// * `Err(SpiderError::Http)` - The request failed or the body could not be read
/// * `Err(SpiderError::BodyTooLarge)` - The body exceeds `max_body_size`
pub async fn fetch_resource(
    client: &Client,
    url: &Url,
    max_body_size: usize,
) -> Result<Resource, SpiderError> {
    let http_error = |source: reqwest::Error| SpiderError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(http_error)?;

    let status = response.status();
    let status_line = format!("{:?} {}", response.version(), status);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    // Reject early when the server announces an oversized body
    if let Some(length) = response.content_length() {
        if length > max_body_size as u64 {
            return Err(SpiderError::BodyTooLarge {
                url: url.to_string(),
                size: usize::try_from(length).unwrap_or(usize::MAX),
                limit: max_body_size,
            });
        }
    }

    let body = response.bytes().await.map_err(http_error)?;
    if body.len() > max_body_size {
        return Err(SpiderError::BodyTooLarge {
            url: url.to_string(),
            size: body.len(),
            limit: max_body_size,
        });
    }

    tracing::debug!(
        "Fetched {} ({}, {} bytes, content type {:?})",
        url,
        status_line,
        body.len(),
        content_type
    );

    let mut resource = Resource::new(url.clone(), status.as_u16())
        .with_status_line(status_line)
        .with_body(body.to_vec());
    if let Some(content_type) = content_type {
        resource = resource.with_content_type(content_type);
    }

    Ok(resource)
}
