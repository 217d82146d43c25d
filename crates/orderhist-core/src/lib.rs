//! Core library for order-history scraping.
//!
//! This crate provides:
//! - Invoice page extraction into order and item records
//! - Order-history crawling and invoice download over an HTTP session
//! - Append-only CSV tables and the items/orders merge

pub mod download;
pub mod error;
pub mod fetch;
pub mod history;
pub mod invoice;
pub mod layout;
pub mod merge;
pub mod models;
pub mod scrape;
pub mod sink;

pub use download::{DownloadSummary, download_invoices};
pub use error::{FetchError, FieldError, OrderhistError, Result};
pub use fetch::{FetchedPage, PageFetcher, Session, SessionFetcher};
pub use history::{HistoryLinks, HistoryPage, crawl_history, parse_history_page};
pub use invoice::{Extraction, FieldMiss, InvoiceDocument, InvoiceExtractor};
pub use layout::AccountDir;
pub use merge::merge_tables;
pub use models::{ItemRecord, OrderItemRecord, OrderRecord, OrderhistConfig};
pub use scrape::{ScrapeSummary, scrape_pages};
pub use sink::{CsvSink, TabularSink};
