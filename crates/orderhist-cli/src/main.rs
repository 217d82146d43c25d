//! CLI application for downloading and tabulating storefront order history.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, crawl, download, extract, merge, run, scrape};

/// Order history - Download invoice pages and turn them into order and item tables
#[derive(Parser)]
#[command(name = "orderhist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl order history pages for invoice URLs
    Crawl(crawl::CrawlArgs),

    /// Download the crawled invoice pages
    Download(download::DownloadArgs),

    /// Extract saved invoice pages into orders and items tables
    Scrape(scrape::ScrapeArgs),

    /// Run several phases in order
    Run(run::RunArgs),

    /// Extract a single saved invoice page
    Extract(extract::ExtractArgs),

    /// Join items with order dates into one table
    Merge(merge::MergeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Crawl(args) => crawl::run(args, config_path).await,
        Commands::Download(args) => download::run(args, config_path).await,
        Commands::Scrape(args) => scrape::run(args, config_path),
        Commands::Run(args) => run::run(args, config_path).await,
        Commands::Extract(args) => extract::run(args),
        Commands::Merge(args) => merge::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
