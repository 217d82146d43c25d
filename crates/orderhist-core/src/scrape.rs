//! Scrape saved invoice pages into the orders and items tables.

use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::invoice::InvoiceExtractor;
use crate::sink::TabularSink;

/// Counts from a scrape pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub orders: usize,
    pub items: usize,
    /// Fields and item cells left empty across all pages.
    pub empty_fields: usize,
    /// Pages that could not be read.
    pub unreadable: usize,
}

/// Extract each page and append its order and items to `sink`.
///
/// An unreadable page is skipped. Sink errors abort the pass.
pub fn scrape_pages<S, P>(
    pages: &[impl AsRef<Path>],
    extractor: &InvoiceExtractor,
    sink: &mut S,
    mut on_page: P,
) -> Result<ScrapeSummary>
where
    S: TabularSink,
    P: FnMut(&Path),
{
    let mut summary = ScrapeSummary::default();

    for page in pages {
        let page = page.as_ref();
        let html = match std::fs::read(page) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Could not read {}: {}", page.display(), e);
                summary.unreadable += 1;
                on_page(page);
                continue;
            }
        };

        let extraction = extractor.extract_html(&html);
        let order_number = &extraction.order.order_number;

        sink.append_order(&extraction.order)?;
        info!("Appended order {}", order_number);
        sink.append_items(&extraction.items)?;
        info!("Appended {} items from order {}", extraction.item_count(), order_number);

        summary.orders += 1;
        summary.items += extraction.item_count();
        summary.empty_fields += extraction.misses.len();
        on_page(page);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{ItemRecord, OrderRecord};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct MemorySink {
        orders: Vec<OrderRecord>,
        items: Vec<ItemRecord>,
    }

    impl TabularSink for MemorySink {
        fn append_order(&mut self, order: &OrderRecord) -> Result<()> {
            self.orders.push(order.clone());
            Ok(())
        }

        fn append_items(&mut self, items: &[ItemRecord]) -> Result<()> {
            self.items.extend_from_slice(items);
            Ok(())
        }
    }

    #[test]
    fn test_invalid_utf8_page_still_yields_order() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("111.html");
        let mut html = b"<html><body><p>Amazon.com order number: 111-2223334-5556667</p>\
                         <p>1 of: <i>Caf".to_vec();
        html.push(0xe9);
        html.extend_from_slice(b"</i></p><p>$2.50</p></body></html>");
        std::fs::write(&page, html).unwrap();

        let mut sink = MemorySink::default();
        let summary = scrape_pages(&[page], &InvoiceExtractor::new(), &mut sink, |_| {}).unwrap();

        assert_eq!(summary.unreadable, 0);
        assert_eq!(summary.orders, 1);
        assert_eq!(sink.orders[0].order_number, "111-2223334-5556667");
        assert_eq!(sink.items[0].item_description, "Caf\u{fffd}");
        assert_eq!(sink.items[0].item_price, "2.50");
    }

    #[test]
    fn test_scrape_skips_unreadable_pages() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("111.html");
        std::fs::write(
            &good,
            "<html><body><p>Amazon.com order number: 111-2223334-5556667</p>\
             <p>1 of: <i>Widget</i></p><p>Sold by: Acme</p>\
             <p>Condition: New</p><p>$4.00</p></body></html>",
        )
        .unwrap();
        let missing = dir.path().join("missing.html");

        let mut sink = MemorySink::default();
        let mut seen = 0;
        let summary = scrape_pages(
            &[missing, good],
            &InvoiceExtractor::new(),
            &mut sink,
            |_| seen += 1,
        )
        .unwrap();

        assert_eq!(seen, 2);
        assert_eq!(summary.orders, 1);
        assert_eq!(summary.items, 1);
        assert_eq!(summary.unreadable, 1);
        assert_eq!(sink.orders[0].order_number, "111-2223334-5556667");
        assert_eq!(sink.items[0].item_description, "Widget");
        assert_eq!(sink.items[0].item_price, "4.00");
    }
}
