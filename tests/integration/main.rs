//! Integration tests for Spider-Sitemap
//!
//! Sitemap fixtures live in `tests/fixtures/sitemapxml`; HTTP tests use
//! wiremock to serve them.

mod common;
mod fetch_tests;
mod sitemap_tests;
