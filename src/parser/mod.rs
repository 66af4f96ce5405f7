//! Resource parsers
//!
//! This module contains the pluggable parsers a spider runs over fetched
//! resources:
//! - The sitemap parser, which reports the locations listed in `sitemap.xml`
//! - The HTML link parser, which reports `<a href>` and canonical links
//! - The chain that offers each resource to every parser in turn

mod chain;
mod classifier;
mod html;
mod sitemap;

pub use chain::{DispatchReport, ParserChain};
pub use classifier::{is_sitemap_path, is_sitemap_resource};
pub use html::{extract_links, HtmlLinkParser};
pub use sitemap::{extract_locations, SitemapXmlParser};

use crate::events::ListenerRegistry;
use crate::resource::Resource;
use scraper::Html;

/// Verdict of a single `parse` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOutcome {
    /// True if the parser recognised the resource and processed all of it,
    /// even when no URL was found
    pub handled: bool,
}

impl ParseOutcome {
    pub const HANDLED: Self = Self { handled: true };
    pub const DECLINED: Self = Self { handled: false };

    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

/// A parser the spider can offer resources to
///
/// Parsers are shared across crawl workers, so they keep no per-call state.
/// URLs are reported through the parser's [`ListenerRegistry`] while `parse`
/// runs.
pub trait SpiderParser: Send + Sync {
    /// Short name used in logs and dispatch reports
    fn name(&self) -> &'static str;

    /// Cheap check, before parsing, of whether this parser may be relevant
    ///
    /// `already_handled` tells whether an earlier parser has already handled
    /// the resource.
    fn can_handle(
        &self,
        resource: Option<&Resource>,
        path: &str,
        already_handled: bool,
    ) -> bool;

    /// Parses the resource, notifying listeners of every URL found
    ///
    /// `document` is the body already parsed as HTML, when the caller has it.
    fn parse(
        &self,
        resource: Option<&Resource>,
        document: Option<&Html>,
        depth: u32,
    ) -> ParseOutcome;

    /// Listeners notified by this parser
    fn listeners(&self) -> &ListenerRegistry;
}
