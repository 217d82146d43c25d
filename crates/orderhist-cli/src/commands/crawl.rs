//! Crawl command - collect invoice URLs from the order history.

use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use orderhist_core::{AccountDir, OrderhistConfig, SessionFetcher, crawl_history};

use super::{AccountArgs, load_config};

/// Arguments for the crawl command.
#[derive(Args)]
pub struct CrawlArgs {
    #[command(flatten)]
    account: AccountArgs,

    /// Most recent year to crawl (overrides crawl.latest_year)
    #[arg(long)]
    latest_year: Option<i32>,

    /// Oldest year to crawl (overrides crawl.oldest_year)
    #[arg(long)]
    oldest_year: Option<i32>,
}

pub async fn run(args: CrawlArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    args.account.apply(&mut config);
    if let Some(year) = args.latest_year {
        config.crawl.latest_year = year;
    }
    if let Some(year) = args.oldest_year {
        config.crawl.oldest_year = year;
    }
    config.validate()?;

    let mut fetcher = SessionFetcher::new(&config.session, config.download.settle_secs)?;
    let result = execute(&mut fetcher, &config).await;
    fetcher.stop();
    result
}

/// Crawl with an existing fetcher.
pub async fn execute(fetcher: &mut SessionFetcher, config: &OrderhistConfig) -> anyhow::Result<()> {
    let account = AccountDir::new(config.account_dir());

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!(
        "Crawling order history {} to {}...",
        config.crawl.latest_year, config.crawl.oldest_year
    ));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let links = crawl_history(fetcher, config, &account).await;
    spinner.finish_and_clear();
    let links = links?;

    println!(
        "{} Found {} invoices, {} order details, {} digital invoices",
        style("✓").green(),
        links.invoices().len(),
        links.details().len(),
        links.digital().len()
    );
    println!(
        "{} URL lists written to {}",
        style("ℹ").blue(),
        account.root().display()
    );

    Ok(())
}
