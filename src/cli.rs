use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::{Builder, Runtime};

use crate::api;
use crate::config::Config;
use crate::log::init_logging;
use crate::tools::extract::extract_match;
use crate::tools::fetch::{PageFetcher, ProxyFetcher, ProxySettings};
use crate::{ApiResponse, Identifier, ResultsError};

#[derive(Parser)]
#[command(name = "hltv-results", version, about = "Enrich match results with format, veto and map scores (JSON only)")]
pub struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch every match in a results file and merge the extracted fields back in
    Enrich(EnrichArgs),
    /// Extract one match from a saved HTML file (no network)
    Extract(ExtractArgs),
    /// Render one match page through the proxy and print its HTML
    Fetch(FetchArgs),
}

#[derive(Args)]
struct ProxyArgs {
    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Rendering proxy endpoint
    #[arg(long)]
    proxy: Option<String>,
}

#[derive(Args)]
struct EnrichArgs {
    /// Results JSON: an array of entries with a `url` field
    input: PathBuf,
    /// Where to write the enriched dataset (defaults to replacing INPUT)
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    proxy: ProxyArgs,
    /// Minimum delay between proxy requests, in milliseconds
    #[arg(long)]
    pacing_ms: Option<u64>,
    /// Maximum in-flight requests
    #[arg(long)]
    concurrency: Option<usize>,
}

#[derive(Args)]
struct ExtractArgs {
    /// Saved match page
    html: PathBuf,
    /// Identifier to stamp on the record
    #[arg(long, default_value = "")]
    url: String,
}

#[derive(Args)]
struct FetchArgs {
    url: String,
    #[command(flatten)]
    proxy: ProxyArgs,
}

pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Command::Enrich(args) => finish(enrich_cmd(args)),
        Command::Extract(args) => finish(extract_cmd(args)),
        Command::Fetch(args) => match fetch_cmd(args) {
            Ok(html) => println!("{html}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
    }
}

fn load_config(args: &ProxyArgs) -> crate::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(proxy) = &args.proxy {
        config.proxy_url = proxy.clone();
    }
    Ok(config)
}

fn enrich_cmd(args: EnrichArgs) -> crate::Result<api::RunReport> {
    let mut config = load_config(&args.proxy)?;
    if let Some(pacing) = args.pacing_ms {
        config.pacing_ms = pacing;
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    let output = args.output.unwrap_or_else(|| args.input.clone());
    runtime()?.block_on(api::enrich_file(&args.input, &output, &config))
}

fn extract_cmd(args: ExtractArgs) -> crate::Result<crate::MatchRecord> {
    let html = read_html(&args.html)?;
    Ok(extract_match(&Identifier::new(args.url), &html))
}

fn fetch_cmd(args: FetchArgs) -> crate::Result<String> {
    let config = load_config(&args.proxy)?;
    config.validate()?;
    let fetcher = ProxyFetcher::new(ProxySettings::from(&config))?;
    let page = runtime()?.block_on(fetcher.fetch_page(&Identifier::new(args.url)))?;
    Ok(page.into_html())
}

/// Runtime for one async command.
fn runtime() -> crate::Result<Runtime> {
    Ok(Builder::new_multi_thread().enable_all().build()?)
}

fn read_html(path: &Path) -> crate::Result<String> {
    std::fs::read_to_string(path).map_err(|e| ResultsError::input(path, e))
}

fn finish<T: serde::Serialize>(res: crate::Result<T>) {
    let failed = res.is_err();
    match res {
        Ok(v) => print_json(ApiResponse::ok(v)),
        Err(e) => print_json(ApiResponse::<()>::err(e.to_string())),
    }
    if failed {
        std::process::exit(1);
    }
}

fn print_json<T: serde::Serialize>(val: T) {
    match serde_json::to_string_pretty(&val) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing to JSON: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_drives_async_commands() {
        let rt = runtime().unwrap();
        let fetched = rt.block_on(async {
            let fetcher = ProxyFetcher::new(ProxySettings::default()).unwrap();
            fetcher.fetch_page(&Identifier::new("not a url")).await
        });
        assert_eq!(fetched.unwrap_err().kind(), "invalid_identifier");
    }

    #[test]
    fn extract_reads_saved_page_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.html");
        std::fs::write(
            &path,
            r#"<div class="g-grid maps"><div class="veto-box"><div class="padding preformatted-text">Best of 1 (LAN)</div></div></div>"#,
        )
        .unwrap();

        let record = extract_cmd(ExtractArgs {
            html: path,
            url: "https://www.hltv.org/matches/1/a-vs-b".to_string(),
        })
        .unwrap();
        assert_eq!(record.format, "Best of 1 (LAN)");
        assert!(record.maps.is_empty());
    }

    #[test]
    fn extract_missing_file_is_input_error() {
        let err = extract_cmd(ExtractArgs {
            html: PathBuf::from("/nonexistent/match.html"),
            url: String::new(),
        })
        .unwrap_err();
        assert!(matches!(err, ResultsError::Input { .. }));
    }
}
