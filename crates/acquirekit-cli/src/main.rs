//! AcquireKit CLI - scrape web pages and fetch YouTube transcripts

mod mcp;

use acquirekit::config::parse_languages;
use acquirekit::{
    FnChannel, ScrapeTool, Status, StatusEvent, TranscriptTool, UserScrapeConfig, TOOL_LLMTXT,
};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// AcquireKit - turn URLs into clean text for language models
#[derive(Parser, Debug)]
#[command(name = "acquirekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: ToolOptions,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp,
    /// Scrape a web page through the reader proxy
    Scrape {
        /// Page URL
        url: String,

        /// Keep embedded link targets
        #[arg(long)]
        raw: bool,
    },
    /// Fetch the transcript of a YouTube video
    Transcript {
        /// YouTube URL
        url: String,
    },
}

/// Settings shared by both tools
#[derive(Args, Debug, Clone, Default)]
struct ToolOptions {
    /// Reader proxy API key
    #[arg(long, env = "JINA_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Reader proxy prefix the page URL is appended to
    #[arg(long, global = true)]
    reader_base: Option<String>,

    /// Bypass the reader proxy cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Structured transcript API endpoint
    #[arg(long, env = "ACQUIREKIT_TRANSCRIPT_API", global = true)]
    transcript_api: Option<String>,

    /// Transcript loader service endpoint, used instead of the transcript API
    #[arg(long, env = "ACQUIREKIT_TRANSCRIPT_LOADER", global = true)]
    transcript_loader: Option<String>,

    /// Comma-separated language preferences, e.g. "en,en_auto"
    #[arg(long, global = true)]
    languages: Option<String>,

    /// Translation target for the loader service
    #[arg(long, global = true)]
    translate_to: Option<String>,

    /// Custom User-Agent
    #[arg(long, global = true)]
    user_agent: Option<String>,
}

impl ToolOptions {
    fn scrape_tool(&self) -> ScrapeTool {
        let mut builder = ScrapeTool::builder().disable_caching(self.no_cache);
        if let Some(ref base) = self.reader_base {
            builder = builder.reader_base(base.clone());
        }
        if let Some(ref key) = self.api_key {
            builder = builder.api_key(key.clone());
        }
        if let Some(ref ua) = self.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        builder.build()
    }

    fn transcript_tool(&self) -> TranscriptTool {
        let mut builder = TranscriptTool::builder();
        if let Some(ref endpoint) = self.transcript_api {
            builder = builder.api_endpoint(endpoint.clone());
        }
        if let Some(ref endpoint) = self.transcript_loader {
            builder = builder.loader_endpoint(endpoint.clone());
        }
        if let Some(languages) = self.languages.as_deref().map(parse_languages) {
            if !languages.is_empty() {
                builder = builder.languages(languages);
            }
        }
        if let Some(ref target) = self.translate_to {
            builder = builder.translate_to(Some(target.clone()));
        }
        if let Some(ref ua) = self.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr, stdout carries results and MCP traffic
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .init();

    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    match cli.command {
        Some(Commands::Mcp) => {
            let server = mcp::McpServer::new(
                cli.options.scrape_tool(),
                cli.options.transcript_tool(),
            );
            mcp::run_server(server).await;
        }
        Some(Commands::Scrape { url, raw }) => {
            run_scrape(&cli.options, &url, raw).await;
        }
        Some(Commands::Transcript { url }) => {
            run_transcript(&cli.options, &url).await;
        }
        None => {
            eprintln!("Usage: acquirekit scrape <URL>");
            eprintln!("   or: acquirekit transcript <URL>");
            eprintln!("   or: acquirekit mcp");
            eprintln!("   or: acquirekit --help");
            std::process::exit(1);
        }
    }
}

async fn run_scrape(options: &ToolOptions, url: &str, raw: bool) {
    let tool = options.scrape_tool();
    let user = UserScrapeConfig {
        clean_content: raw.then_some(false),
        api_key: None,
    };
    let channel = FnChannel::new(print_status);

    match tool.run(Some(url), Some(&user), Some(&channel)).await {
        Ok(acquired) => writeln_safe(&acquired.content),
        // The terminal status event already carried the error text
        Err(_) => std::process::exit(1),
    }
}

async fn run_transcript(options: &ToolOptions, url: &str) {
    let tool = options.transcript_tool();
    let channel = FnChannel::new(print_status);

    match tool.run(Some(url), None, Some(&channel)).await {
        Ok(acquired) => writeln_safe(&acquired.content),
        Err(_) => std::process::exit(1),
    }
}

fn print_status(event: StatusEvent) {
    eprintln!("{}", format_status(&event));
}

/// Render a status event as a single stderr line
fn format_status(event: &StatusEvent) -> String {
    match event.status {
        Status::InProgress => format!("... {}", event.description),
        Status::Success => format!("ok: {}", event.description),
        Status::Error => event.description.clone(),
    }
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status() {
        assert_eq!(
            format_status(&StatusEvent::progress("Scraping https://toscrape.com/")),
            "... Scraping https://toscrape.com/"
        );
        assert_eq!(
            format_status(&StatusEvent::success("Successfully Scraped Scraping Sandbox")),
            "ok: Successfully Scraped Scraping Sandbox"
        );
        assert_eq!(
            format_status(&StatusEvent::error("Error: Request timed out")),
            "Error: Request timed out"
        );
    }

    #[test]
    fn test_parse_scrape() {
        let cli =
            Cli::try_parse_from(["acquirekit", "scrape", "https://toscrape.com/", "--raw"])
                .unwrap();
        match cli.command {
            Some(Commands::Scrape { url, raw }) => {
                assert_eq!(url, "https://toscrape.com/");
                assert!(raw);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "acquirekit",
            "transcript",
            "https://youtu.be/abc123",
            "--languages",
            "de,en",
            "--transcript-loader",
            "http://localhost:9000/load",
        ])
        .unwrap();

        assert_eq!(cli.options.languages.as_deref(), Some("de,en"));
        assert_eq!(
            cli.options.transcript_tool().source_name(),
            "transcript_loader"
        );
    }

    #[test]
    fn test_transcript_tool_defaults_to_api() {
        let options = ToolOptions::default();
        assert_eq!(options.transcript_tool().source_name(), "transcript_api");
    }

    #[test]
    fn test_llmtxt_flag() {
        let cli = Cli::try_parse_from(["acquirekit", "--llmtxt"]).unwrap();
        assert!(cli.llmtxt);
        assert!(cli.command.is_none());
    }
}
