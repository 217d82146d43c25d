//! Scrape command - extract saved invoice pages into tables.

use clap::Args;
use console::style;
use tracing::warn;

use orderhist_core::{AccountDir, CsvSink, InvoiceExtractor, OrderhistConfig, scrape_pages};

use super::{AccountArgs, load_config, page_progress};

/// Arguments for the scrape command.
#[derive(Args)]
pub struct ScrapeArgs {
    #[command(flatten)]
    account: AccountArgs,

    /// Append to existing tables instead of recreating them
    #[arg(long)]
    append: bool,
}

pub fn run(args: ScrapeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    args.account.apply(&mut config);
    config.validate()?;

    execute(&config, args.append)
}

/// Scrape every saved page of the configured account.
pub fn execute(config: &OrderhistConfig, append: bool) -> anyhow::Result<()> {
    let account = AccountDir::new(config.account_dir());

    let pages = account.saved_pages()?;
    if pages.is_empty() {
        warn!("No saved pages in {}", account.pages_dir().display());
    }

    let mut sink = if append && account.orders_table().exists() && account.items_table().exists() {
        CsvSink::open(account.root())?
    } else {
        CsvSink::create(account.root())?
    };

    let extractor = InvoiceExtractor::new();
    let pb = page_progress(pages.len(), "pages");
    let summary = scrape_pages(&pages, &extractor, &mut sink, |page| {
        if let Some(name) = page.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    });
    pb.finish_and_clear();
    let summary = summary?;

    println!(
        "{} Scraped {} orders with {} items",
        style("✓").green(),
        summary.orders,
        summary.items
    );
    println!(
        "{} Tables: {}, {}",
        style("ℹ").blue(),
        sink.orders_path().display(),
        sink.items_path().display()
    );
    if summary.empty_fields > 0 {
        println!(
            "{} {} fields could not be located and were left empty (use -vv for details)",
            style("⚠").yellow(),
            summary.empty_fields
        );
    }
    if summary.unreadable > 0 {
        println!(
            "{} {} pages could not be read",
            style("⚠").yellow(),
            summary.unreadable
        );
    }

    Ok(())
}
