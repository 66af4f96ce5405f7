//! Spider-Sitemap main entry point
//!
//! This is the command-line interface: it runs the parser chain over one
//! resource, fetched over HTTP or read from disk, and prints what was found.

use anyhow::{bail, Context};
use clap::Parser;
use spider_sitemap::config::{load_config, Config};
use spider_sitemap::fetch::{build_http_client, fetch_resource};
use spider_sitemap::{Discovery, ListenerRegistry, ParserChain, Resource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Spider-Sitemap: find the URLs listed in a sitemap
///
/// TARGET is either an http(s) URL, which is fetched, or a local file, which
/// is parsed as if it had been served with --content-type.
#[derive(Parser, Debug)]
#[command(name = "spider-sitemap")]
#[command(version)]
#[command(about = "Extract crawl targets from sitemaps and pages", long_about = None)]
struct Cli {
    /// URL to fetch or file to read
    #[arg(value_name = "TARGET")]
    target: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Crawl depth reported with every discovered URL
    #[arg(short, long, default_value_t = 0)]
    depth: u32,

    /// Content type of a local file
    #[arg(long, default_value = "text/xml")]
    content_type: String,

    /// URL a local file is treated as having been served from
    #[arg(long)]
    url: Option<Url>,

    /// Print discovered locations exactly as written, without resolving them
    #[arg(long)]
    raw: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    let resource = if is_http_target(&cli.target) {
        let url = Url::parse(&cli.target).context("invalid target URL")?;
        let client = build_http_client(&config.fetch)?;
        tracing::info!("Fetching {}", url);
        fetch_resource(&client, &url, config.fetch.max_body_size).await?
    } else {
        read_resource(Path::new(&cli.target), cli.url.clone(), &cli.content_type)?
    };

    let report = run_chain(&config, &resource, cli.depth, cli.raw);

    if !report.is_handled() {
        bail!(
            "no parser handled {} ({}, content type {:?})",
            resource.url(),
            resource.status_line(),
            resource.content_type()
        );
    }

    tracing::info!("Handled by: {}", report.handled_by.join(", "));
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("spider_sitemap=info,warn"),
            1 => EnvFilter::new("spider_sitemap=debug,info"),
            2 => EnvFilter::new("spider_sitemap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Discoveries go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

fn is_http_target(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Reads a local file into a 200 response with the given content type
fn read_resource(path: &Path, url: Option<Url>, content_type: &str) -> anyhow::Result<Resource> {
    let body = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let url = match url {
        Some(url) => url,
        None => {
            let absolute = std::fs::canonicalize(path)?;
            match Url::from_file_path(&absolute) {
                Ok(url) => url,
                Err(()) => bail!("cannot turn {} into a URL", absolute.display()),
            }
        }
    };

    Ok(Resource::new(url, 200)
        .with_status_line("HTTP/1.1 200 OK")
        .with_content_type(content_type)
        .with_body(body))
}

/// Runs the default chain, printing each discovery on stdout
fn run_chain(
    config: &Config,
    resource: &Resource,
    depth: u32,
    raw: bool,
) -> spider_sitemap::DispatchReport {
    let base = resource.url().clone();
    let listeners = ListenerRegistry::new();
    listeners.add(Arc::new(move |discovery: &Discovery| {
        match discovery.resolve(&base).filter(|_| !raw) {
            Some(url) => println!("{}", url),
            None => println!("{}", discovery.url()),
        }
    }));

    ParserChain::with_default_parsers(&config.parser, listeners)
        .with_max_body_size(config.fetch.max_body_size)
        .dispatch(resource, depth)
}
