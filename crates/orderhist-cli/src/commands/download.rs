//! Download command - save invoice pages for the crawled URLs.

use clap::Args;
use console::style;

use orderhist_core::layout::INVOICE_URLS;
use orderhist_core::{AccountDir, OrderhistConfig, SessionFetcher, download_invoices};

use super::{AccountArgs, load_config, page_progress};

/// Arguments for the download command.
#[derive(Args)]
pub struct DownloadArgs {
    #[command(flatten)]
    account: AccountArgs,

    /// Base delay between downloads in seconds (overrides download.delay_secs)
    #[arg(long)]
    delay: Option<f64>,
}

pub async fn run(args: DownloadArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    args.account.apply(&mut config);
    if let Some(delay) = args.delay {
        config.download.delay_secs = delay;
    }
    config.validate()?;

    let mut fetcher = SessionFetcher::new(&config.session, config.download.settle_secs)?;
    let result = execute(&mut fetcher, &config).await;
    fetcher.stop();
    result
}

/// Download with an existing fetcher.
pub async fn execute(fetcher: &mut SessionFetcher, config: &OrderhistConfig) -> anyhow::Result<()> {
    let account = AccountDir::new(config.account_dir());

    let list = account.url_list_path(INVOICE_URLS);
    if !list.exists() {
        anyhow::bail!(
            "No invoice list at {}.\n\nRun 'orderhist crawl' first.",
            list.display()
        );
    }
    let total = account.read_url_list(INVOICE_URLS)?.len();

    let pb = page_progress(total, "pages");
    let summary = download_invoices(fetcher, config, &account, |_| pb.inc(1)).await;
    pb.finish_and_clear();
    let summary = summary?;

    println!(
        "{} Saved {} of {} invoice pages to {}",
        style("✓").green(),
        summary.saved,
        summary.total(),
        account.pages_dir().display()
    );
    if summary.failed > 0 || summary.skipped > 0 {
        println!(
            "{} {} failed, {} without an order id",
            style("⚠").yellow(),
            summary.failed,
            summary.skipped
        );
    }

    Ok(())
}
