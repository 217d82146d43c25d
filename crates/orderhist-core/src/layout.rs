//! Files kept in a per-account directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::sink::{ITEMS_FILE, ORDERS_FILE};

/// Invoice (print view) URLs discovered while crawling.
pub const INVOICE_URLS: &str = "invoices";

/// Order-detail URLs discovered while crawling.
pub const DETAIL_URLS: &str = "order-details";

/// Digital order-summary URLs discovered while crawling.
pub const DIGITAL_URLS: &str = "digital-invoices";

/// Merged items-with-dates table.
pub const ORDER_ITEMS_FILE: &str = "order_items.csv";

/// Directory of one account's URL lists, saved pages and tables.
#[derive(Debug, Clone)]
pub struct AccountDir {
    root: PathBuf,
}

impl AccountDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of saved invoice pages.
    pub fn pages_dir(&self) -> PathBuf {
        self.root.join("orders")
    }

    /// Saved page path for an order id.
    pub fn page_path(&self, order_id: &str) -> PathBuf {
        self.pages_dir().join(format!("{order_id}.html"))
    }

    /// Saved pages, sorted by file name.
    pub fn saved_pages(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.pages_dir().join("*.html");
        let mut pages: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
            .filter_map(|entry| entry.ok())
            .collect();
        pages.sort();
        Ok(pages)
    }

    pub fn orders_table(&self) -> PathBuf {
        self.root.join(ORDERS_FILE)
    }

    pub fn items_table(&self) -> PathBuf {
        self.root.join(ITEMS_FILE)
    }

    pub fn order_items_table(&self) -> PathBuf {
        self.root.join(ORDER_ITEMS_FILE)
    }

    /// Path of a JSON URL list.
    pub fn url_list_path(&self, basename: &str) -> PathBuf {
        self.root.join(format!("{basename}.json"))
    }

    /// Write a URL list as pretty JSON.
    pub fn write_url_list(&self, basename: &str, urls: &[String]) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.url_list_path(basename);
        debug!("Writing {} URLs to {}", urls.len(), path.display());
        std::fs::write(&path, serde_json::to_string_pretty(urls)?)?;
        Ok(())
    }

    /// Read a URL list written by [`AccountDir::write_url_list`].
    pub fn read_url_list(&self, basename: &str) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(self.url_list_path(basename))?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Order id carried in an invoice URL's `orderID` query parameter.
///
/// The id names a saved page, so only ASCII letters, digits and `-` are
/// accepted; anything else yields `None`.
pub fn order_id_from_url(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("orderID=")?;
    let id = rest.split(['&', '#']).next().unwrap_or_default();
    let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    valid.then_some(id)
}

/// Make a site-relative URL absolute.
pub fn absolute_url(root_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!(
            "{}/{}",
            root_url.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_order_id_from_url() {
        assert_eq!(
            order_id_from_url("/gp/css/summary/print.html/ref=x?ie=UTF8&orderID=111-2223334-5556667"),
            Some("111-2223334-5556667")
        );
        assert_eq!(
            order_id_from_url("/print.html?orderID=D01-123&ref=abc"),
            Some("D01-123")
        );
        assert_eq!(order_id_from_url("/print.html?orderID="), None);
        assert_eq!(order_id_from_url("/print.html?ie=UTF8"), None);
    }

    #[test]
    fn test_order_id_cannot_leave_pages_dir() {
        assert_eq!(
            order_id_from_url("/gp/css/summary/print.html?orderID=../../../../tmp/pwned"),
            None
        );
        assert_eq!(order_id_from_url("/print.html?orderID=111/222"), None);
        assert_eq!(order_id_from_url("/print.html?orderID=111%2F222"), None);
        assert_eq!(order_id_from_url("/print.html?orderID=..&ref=x"), None);
        assert_eq!(order_id_from_url("/print.html?orderID=C:evil"), None);
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://www.amazon.com", "/gp/css/summary/print.html"),
            "https://www.amazon.com/gp/css/summary/print.html"
        );
        assert_eq!(
            absolute_url("https://www.amazon.com/", "gp/x"),
            "https://www.amazon.com/gp/x"
        );
        assert_eq!(absolute_url("https://a.test", "https://b.test/x"), "https://b.test/x");
    }

    #[test]
    fn test_url_list_round_trip_and_saved_pages() {
        let dir = tempfile::tempdir().unwrap();
        let account = AccountDir::new(dir.path().join("personal"));

        let urls = vec!["/a?orderID=1".to_string(), "/b?orderID=2".to_string()];
        account.write_url_list(INVOICE_URLS, &urls).unwrap();
        assert_eq!(account.read_url_list(INVOICE_URLS).unwrap(), urls);

        std::fs::create_dir_all(account.pages_dir()).unwrap();
        std::fs::write(account.page_path("2"), "").unwrap();
        std::fs::write(account.page_path("1"), "").unwrap();
        std::fs::write(account.pages_dir().join("notes.txt"), "").unwrap();

        let pages = account.saved_pages().unwrap();
        assert_eq!(pages, vec![account.page_path("1"), account.page_path("2")]);
    }
}
