//! Spider-Sitemap: sitemap discovery for a crawling spider
//!
//! This crate implements the pluggable resource parsers a spider runs over
//! fetched HTTP resources. The centrepiece is the sitemap parser, which
//! recognises `sitemap.xml` documents, parses them with a locked-down XML
//! reader and reports every listed location to the registered listeners.

pub mod config;
pub mod events;
pub mod fetch;
pub mod parser;
pub mod resource;
pub mod xml;

use thiserror::Error;

/// Main error type for Spider-Sitemap operations
///
/// Parsers never return these: a resource a parser cannot process is simply
/// declined. Errors come from the collaborators around the parsers (config
/// loading and fetching).
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Response body of {url} is {size} bytes, limit is {limit}")]
    BodyTooLarge {
        url: String,
        size: usize,
        limit: usize,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Spider-Sitemap operations
pub type Result<T> = std::result::Result<T, SpiderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, FetchConfig, ParserConfig};
pub use events::{CollectingListener, Discovery, ListenerRegistry, ParserListener};
pub use parser::{
    DispatchReport, HtmlLinkParser, ParseOutcome, ParserChain, SitemapXmlParser, SpiderParser,
};
pub use resource::Resource;
