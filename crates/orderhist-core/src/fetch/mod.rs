//! Page retrieval: the session-backed fetcher and request pacing.

mod pacing;
mod session;

pub use pacing::{jittered_delay, wait_a_bit};
pub use session::{Session, SessionFetcher};

use std::future::Future;

/// A fetched page. On failure `success` is false and `body` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub body: String,
    pub success: bool,
}

impl FetchedPage {
    pub fn ok(url: &str, body: String) -> Self {
        Self {
            url: url.to_string(),
            body,
            success: true,
        }
    }

    pub fn failed(url: &str) -> Self {
        Self {
            url: url.to_string(),
            body: String::new(),
            success: false,
        }
    }
}

/// Source of storefront pages.
///
/// A failed fetch is not an error for the caller: skip the page or retry
/// later, and keep going.
pub trait PageFetcher {
    /// Fetch `url`. With `scroll_to_end`, wait for lazily loaded content
    /// before returning.
    fn fetch_page(
        &mut self,
        url: &str,
        scroll_to_end: bool,
    ) -> impl Future<Output = FetchedPage> + Send;
}
