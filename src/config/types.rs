use serde::Deserialize;

/// Default User-Agent sent by the fetcher
pub const DEFAULT_USER_AGENT: &str = concat!("spider-sitemap/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on response bodies handed to the parsers (10 MiB)
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Main configuration structure for Spider-Sitemap
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Feature flags read by the resource parsers
///
/// A parser takes its own copy at construction, so a parse call always sees
/// one consistent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Whether `sitemap.xml` documents are parsed for URLs
    #[serde(rename = "parse-sitemap-xml", default = "default_true")]
    pub parse_sitemap_xml: bool,

    /// Whether HTML pages are parsed for links
    #[serde(rename = "parse-html", default = "default_true")]
    pub parse_html: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            parse_sitemap_xml: true,
            parse_html: true,
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Largest response body (bytes) that will be handed to the parsers
    #[serde(rename = "max-body-size", default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_body_size() -> usize {
    DEFAULT_MAX_BODY_SIZE
}
