//! Invoice page download.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::fetch::{PageFetcher, wait_a_bit};
use crate::layout::{AccountDir, INVOICE_URLS, absolute_url, order_id_from_url};
use crate::models::config::OrderhistConfig;

/// Outcome counts of a download pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub saved: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl DownloadSummary {
    pub fn total(&self) -> usize {
        self.saved + self.failed + self.skipped
    }
}

/// Download every URL of the invoice list into `orders/<orderId>.html`.
///
/// `on_page` is called once per URL, after it has been handled.
pub async fn download_invoices<F, P>(
    fetcher: &mut F,
    config: &OrderhistConfig,
    account: &AccountDir,
    mut on_page: P,
) -> Result<DownloadSummary>
where
    F: PageFetcher,
    P: FnMut(&str),
{
    let urls = account.read_url_list(INVOICE_URLS)?;
    std::fs::create_dir_all(account.pages_dir())?;
    info!("Downloading {} invoice pages", urls.len());

    let mut summary = DownloadSummary::default();
    for url in &urls {
        let Some(order_id) = order_id_from_url(url) else {
            warn!("No usable order id in {}; skipping", url);
            summary.skipped += 1;
            on_page(url);
            continue;
        };

        let target = absolute_url(&config.account.root_url, url);
        let path = account.page_path(order_id);
        debug!("Downloading {} to {}", target, path.display());

        let page = fetcher.fetch_page(&target, false).await;
        if page.success {
            std::fs::write(&path, page.body.as_bytes())?;
            debug!("Wrote {}", path.display());
            summary.saved += 1;
        } else {
            warn!("Could not download order {}", order_id);
            summary.failed += 1;
        }
        on_page(url);

        wait_a_bit(config.download.delay_secs).await;
    }

    info!(
        "Downloaded {} pages ({} failed, {} skipped)",
        summary.saved, summary.failed, summary.skipped
    );
    Ok(summary)
}
