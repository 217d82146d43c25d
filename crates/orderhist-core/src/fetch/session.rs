//! Authenticated HTTP session and the restartable fetcher built on it.

use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use super::{FetchedPage, PageFetcher};
use crate::error::{FetchError, Result};
use crate::models::config::SessionConfig;

/// A live HTTP client carrying the account's session cookie.
#[derive(Debug)]
pub struct Session {
    client: reqwest::Client,
}

impl Session {
    /// Build a client with the session headers.
    pub fn start(
        user_agent: &str,
        cookie: Option<&str>,
        timeout: Duration,
    ) -> std::result::Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie {
            let value = HeaderValue::from_str(cookie).map_err(|e| FetchError::Header {
                name: COOKIE.to_string(),
                reason: e.to_string(),
            })?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        debug!("Session started (cookie: {})", cookie.is_some());
        Ok(Self { client })
    }

    /// GET `url` and return the body of a successful response.
    pub async fn get(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }

    /// End the session.
    pub fn stop(self) {
        debug!("Session stopped");
    }
}

/// [`PageFetcher`] over a [`Session`].
///
/// The session starts on the first fetch. A failed fetch stops it, and the
/// next fetch starts a fresh one.
#[derive(Debug)]
pub struct SessionFetcher {
    session: Option<Session>,
    user_agent: String,
    cookie: Option<String>,
    timeout: Duration,
    settle: Duration,
}

impl SessionFetcher {
    pub fn new(config: &SessionConfig, settle_secs: f64) -> Result<Self> {
        let cookie = config.resolve_cookie()?;
        if cookie.is_none() {
            warn!("No session cookie configured; account pages will likely redirect to sign-in");
        }
        Ok(Self {
            session: None,
            user_agent: config.user_agent.clone(),
            cookie,
            timeout: Duration::from_secs(config.timeout_secs),
            settle: Duration::from_secs_f64(settle_secs.max(0.0)),
        })
    }

    /// Start the session now instead of on the first fetch.
    pub fn start(&mut self) -> std::result::Result<(), FetchError> {
        if self.session.is_none() {
            self.session = Some(Session::start(
                &self.user_agent,
                self.cookie.as_deref(),
                self.timeout,
            )?);
            info!("Started fetch session");
        }
        Ok(())
    }

    /// Stop the session, if one is running.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }
}

impl PageFetcher for SessionFetcher {
    async fn fetch_page(&mut self, url: &str, scroll_to_end: bool) -> FetchedPage {
        if let Err(e) = self.start() {
            warn!("Could not start session for {}: {}", url, e);
            return FetchedPage::failed(url);
        }

        let result = match &self.session {
            Some(session) => session.get(url).await,
            None => return FetchedPage::failed(url),
        };

        match result {
            Ok(body) => {
                if scroll_to_end && !self.settle.is_zero() {
                    tokio::time::sleep(self.settle).await;
                }
                debug!("Fetched {} ({} bytes)", url, body.len());
                FetchedPage::ok(url, body)
            }
            Err(e) => {
                warn!("Fetch failed for {}: {}; restarting session on next request", url, e);
                self.stop();
                FetchedPage::failed(url)
            }
        }
    }
}
