//! Order-history crawl: walks the listing pages of each year and collects
//! invoice, order-detail and digital order-summary links.

use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::fetch::{PageFetcher, wait_a_bit};
use crate::layout::{AccountDir, DETAIL_URLS, DIGITAL_URLS, INVOICE_URLS};
use crate::models::config::OrderhistConfig;

lazy_static! {
    static ref LINK: Selector = Selector::parse("a[href]").unwrap();
    static ref NUM_ORDERS: Selector = Selector::parse("span.num-orders").unwrap();
}

/// Kind of order link found on a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Invoice,
    Detail,
    Digital,
}

impl LinkKind {
    /// Classify an `href`; `None` for links the crawl ignores.
    pub fn classify(href: &str) -> Option<Self> {
        if href.contains("/gp/css/summary/print.html") {
            Some(LinkKind::Invoice)
        } else if href.contains("/gp/your-account/order-details") {
            Some(LinkKind::Detail)
        } else if href.contains("/gp/digital/your-account/order-summary") {
            Some(LinkKind::Digital)
        } else {
            None
        }
    }
}

/// De-duplicated order links, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLinks {
    invoices: Vec<String>,
    details: Vec<String>,
    digital: Vec<String>,
}

impl HistoryLinks {
    /// Record `href` under its kind. Returns true if it was new.
    pub fn add(&mut self, href: &str) -> bool {
        let list = match LinkKind::classify(href) {
            Some(LinkKind::Invoice) => &mut self.invoices,
            Some(LinkKind::Detail) => &mut self.details,
            Some(LinkKind::Digital) => &mut self.digital,
            None => return false,
        };
        if list.iter().any(|known| known == href) {
            return false;
        }
        list.push(href.to_string());
        true
    }

    pub fn invoices(&self) -> &[String] {
        &self.invoices
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn digital(&self) -> &[String] {
        &self.digital
    }

    pub fn len(&self) -> usize {
        self.invoices.len() + self.details.len() + self.digital.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persist the three lists as JSON in the account directory.
    pub fn save(&self, account: &AccountDir) -> Result<()> {
        account.write_url_list(INVOICE_URLS, &self.invoices)?;
        account.write_url_list(DETAIL_URLS, &self.details)?;
        account.write_url_list(DIGITAL_URLS, &self.digital)?;
        Ok(())
    }
}

/// What one listing page yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryPage {
    /// Order count announced in the page header, if present.
    pub num_orders: Option<u32>,
    /// Every classified link, in document order (duplicates kept).
    pub links: Vec<String>,
}

/// Parse one order-history listing page.
pub fn parse_history_page(html: &str) -> HistoryPage {
    let document = Html::parse_document(html);

    let num_orders = document.select(&NUM_ORDERS).next().and_then(|span| {
        span.text()
            .collect::<String>()
            .split_whitespace()
            .next()
            .and_then(|count| count.replace(',', "").parse().ok())
    });

    let links = document
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| LinkKind::classify(href).is_some())
        .map(str::to_string)
        .collect();

    HistoryPage { num_orders, links }
}

/// URL of listing page `page` (1-based) for `year`.
pub fn listing_url(root_url: &str, year: i32, page: u32, page_size: u32) -> String {
    let page = page.max(1);
    format!(
        "{}/gp/your-account/order-history/ref=ppx_yo_dt_b_pagination_{}_{}?ie=UTF8&orderFilter=year-{}&search=&startIndex={}",
        root_url.trim_end_matches('/'),
        page - 1,
        page,
        year,
        (page - 1) * page_size
    )
}

/// Crawl every configured year, newest first.
///
/// A year ends at the first page that adds no new link or fails to load.
/// The URL lists are saved after each year, so an interrupted crawl keeps
/// what it found.
pub async fn crawl_history<F: PageFetcher>(
    fetcher: &mut F,
    config: &OrderhistConfig,
    account: &AccountDir,
) -> Result<HistoryLinks> {
    let crawl = &config.crawl;
    let mut links = HistoryLinks::default();

    for year in (crawl.oldest_year..=crawl.latest_year).rev() {
        let mut page_num = 1;
        loop {
            let url = listing_url(&config.account.root_url, year, page_num, crawl.page_size);
            debug!("Fetching listing page {} for {}", page_num, year);

            let page = fetcher.fetch_page(&url, false).await;
            if !page.success {
                warn!("Listing page {} for {} failed; moving on", page_num, year);
                break;
            }

            let listing = parse_history_page(&page.body);
            if page_num == 1 {
                match listing.num_orders {
                    Some(n) => info!("{} orders placed in {}", n, year),
                    None => debug!("No order count on first page for {}", year),
                }
            }

            let mut added = false;
            for href in &listing.links {
                added |= links.add(href);
            }
            if !added {
                break;
            }

            page_num += 1;
            wait_a_bit(crawl.page_delay_secs).await;
        }

        info!(
            "Year {}: {} invoices, {} order details, {} digital invoices so far",
            year,
            links.invoices().len(),
            links.details().len(),
            links.digital().len()
        );
        links.save(account)?;
    }

    Ok(links)
}
