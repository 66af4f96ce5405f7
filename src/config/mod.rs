//! Configuration module for Spider-Sitemap
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file section falls back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use spider_sitemap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("spider.toml")).unwrap();
//! println!("Sitemap parsing enabled: {}", config.parser.parse_sitemap_xml);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, ParserConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
