//! Parser chain
//!
//! Offers a fetched resource to every registered parser, in order.

use super::{HtmlLinkParser, SitemapXmlParser, SpiderParser};
use crate::config::ParserConfig;
use crate::events::ListenerRegistry;
use crate::resource::Resource;
use scraper::Html;
use std::sync::Arc;

/// What happened when a resource went through the chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Names of the parsers that handled the resource, in chain order
    pub handled_by: Vec<&'static str>,
}

impl DispatchReport {
    /// True if at least one parser handled the resource
    pub fn is_handled(&self) -> bool {
        !self.handled_by.is_empty()
    }
}

/// Ordered list of parsers a resource is offered to
#[derive(Clone, Default)]
pub struct ParserChain {
    parsers: Vec<Arc<dyn SpiderParser>>,
    max_body_size: Option<usize>,
}

impl ParserChain {
    /// Creates an empty chain without a body size limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard chain: sitemap parser, then HTML link parser
    ///
    /// Both parsers notify `listeners`.
    pub fn with_default_parsers(config: &ParserConfig, listeners: ListenerRegistry) -> Self {
        let mut chain = Self::new();
        chain.push(Arc::new(SitemapXmlParser::with_listeners(
            config.clone(),
            listeners.clone(),
        )));
        chain.push(Arc::new(HtmlLinkParser::with_listeners(
            config.clone(),
            listeners,
        )));
        chain
    }

    /// Sets the largest body the chain will hand to its parsers
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = Some(max_body_size);
        self
    }

    /// Appends a parser to the end of the chain
    pub fn push(&mut self, parser: Arc<dyn SpiderParser>) {
        self.parsers.push(parser);
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Offers the resource to every parser in the chain
    ///
    /// Each parser that accepts the resource (`can_handle`) parses it. Parsers
    /// later in the chain are told whether an earlier one already handled it.
    /// Resources whose body exceeds the size limit are not parsed at all.
    pub fn dispatch(&self, resource: &Resource, depth: u32) -> DispatchReport {
        let mut report = DispatchReport::default();

        if let Some(limit) = self.max_body_size {
            if resource.body().len() > limit {
                tracing::warn!(
                    "Not parsing {}, body of {} bytes exceeds limit of {}",
                    resource.url(),
                    resource.body().len(),
                    limit
                );
                return report;
            }
        }

        // Built on first use, shared by every HTML-oriented parser
        let mut document: Option<Html> = None;

        for parser in &self.parsers {
            if !parser.can_handle(Some(resource), resource.path(), report.is_handled()) {
                continue;
            }

            if document.is_none() && resource.is_html() {
                document = Some(Html::parse_document(&String::from_utf8_lossy(
                    resource.body(),
                )));
            }

            tracing::trace!("Offering {} to parser {}", resource.url(), parser.name());
            if parser.parse(Some(resource), document.as_ref(), depth).handled {
                report.handled_by.push(parser.name());
            }
        }

        if !report.is_handled() {
            tracing::debug!("No parser handled {}", resource.url());
        }

        report
    }
}

impl std::fmt::Debug for ParserChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserChain")
            .field(
                "parsers",
                &self.parsers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("max_body_size", &self.max_body_size)
            .finish()
    }
}
