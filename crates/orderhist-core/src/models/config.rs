//! Configuration structures for the order-history pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::OrderhistError;

/// Main configuration for the orderhist pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderhistConfig {
    /// Account and storefront settings.
    pub account: AccountConfig,

    /// Order-history crawl settings.
    pub crawl: CrawlConfig,

    /// Invoice download settings.
    pub download: DownloadConfig,

    /// HTTP session settings.
    pub session: SessionConfig,

    /// Which phases `run` executes when no flag is given.
    pub phases: PhaseConfig,
}

/// Account and storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Account label; names the per-account output directory.
    pub name: String,

    /// Storefront root URL, used to absolutize relative links.
    pub root_url: String,

    /// Directory holding per-account directories.
    pub output_dir: PathBuf,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            name: "personal".to_string(),
            root_url: "https://www.amazon.com".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Order-history crawl configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Most recent year to crawl (inclusive).
    pub latest_year: i32,

    /// Oldest year to crawl (inclusive).
    pub oldest_year: i32,

    /// Orders per listing page.
    pub page_size: u32,

    /// Base delay between listing pages, in seconds.
    pub page_delay_secs: f64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            latest_year: 2023,
            oldest_year: 2022,
            page_size: 10,
            page_delay_secs: 3.0,
        }
    }
}

/// Invoice download configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Base delay between invoice downloads, in seconds.
    pub delay_secs: f64,

    /// Extra wait after a page requested with scroll-to-end, in seconds.
    pub settle_secs: f64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            delay_secs: 3.0,
            settle_secs: 5.0,
        }
    }
}

/// HTTP session configuration.
///
/// Login is not automated: sign in with a browser and copy the `Cookie`
/// header of an authenticated request into `cookie` (or a file named by
/// `cookie_file`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Raw `Cookie` header value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,

    /// File containing the raw `Cookie` header value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_file: Option<PathBuf>,

    /// User agent sent with every request.
    pub user_agent: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie: None,
            cookie_file: None,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0 Safari/537.36"
                .to_string(),
            timeout_secs: 30,
        }
    }
}

impl SessionConfig {
    /// Resolve the cookie header, reading `cookie_file` when set.
    pub fn resolve_cookie(&self) -> Result<Option<String>, std::io::Error> {
        if let Some(cookie) = &self.cookie {
            return Ok(Some(cookie.trim().to_string()));
        }
        match &self.cookie_file {
            Some(path) => Ok(Some(std::fs::read_to_string(path)?.trim().to_string())),
            None => Ok(None),
        }
    }
}

/// Phase toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    /// Crawl order history for invoice URLs.
    pub crawl: bool,

    /// Download invoice pages.
    pub download: bool,

    /// Scrape local invoice pages into tables.
    pub scrape: bool,
}

impl OrderhistConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Directory holding this account's URL lists, pages and tables.
    pub fn account_dir(&self) -> PathBuf {
        self.account.output_dir.join(&self.account.name)
    }

    /// Check settings that would otherwise fail halfway through a run.
    pub fn validate(&self) -> crate::Result<()> {
        if self.account.name.trim().is_empty() {
            return Err(OrderhistError::Config("account.name is empty".to_string()));
        }
        let root = &self.account.root_url;
        if !(root.starts_with("http://") || root.starts_with("https://")) {
            return Err(OrderhistError::Config(format!(
                "account.root_url must be an http(s) URL, got {root:?}"
            )));
        }
        if self.crawl.oldest_year > self.crawl.latest_year {
            return Err(OrderhistError::Config(format!(
                "crawl.oldest_year ({}) is after crawl.latest_year ({})",
                self.crawl.oldest_year, self.crawl.latest_year
            )));
        }
        if self.crawl.page_size == 0 {
            return Err(OrderhistError::Config("crawl.page_size must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: OrderhistConfig =
            serde_json::from_str(r#"{"crawl": {"latest_year": 2024}}"#).unwrap();

        assert_eq!(config.crawl.latest_year, 2024);
        assert_eq!(config.crawl.oldest_year, 2022);
        assert_eq!(config.crawl.page_size, 10);
        assert_eq!(config.account.name, "personal");
        assert!(!config.phases.scrape);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = OrderhistConfig::default();
        config.account.name = "work".to_string();
        config.phases.scrape = true;
        config.save(&path).unwrap();

        let loaded = OrderhistConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.account_dir(), PathBuf::from(".").join("work"));
    }

    #[test]
    fn test_validate() {
        assert!(OrderhistConfig::default().validate().is_ok());

        let mut config = OrderhistConfig::default();
        config.crawl.oldest_year = 2030;
        assert!(matches!(config.validate(), Err(OrderhistError::Config(_))));

        let mut config = OrderhistConfig::default();
        config.account.root_url = "www.amazon.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_cookie_prefers_inline_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookie.txt");
        std::fs::write(&path, "session-id=file\n").unwrap();

        let mut session = SessionConfig {
            cookie_file: Some(path),
            ..SessionConfig::default()
        };
        assert_eq!(session.resolve_cookie().unwrap().as_deref(), Some("session-id=file"));

        session.cookie = Some(" session-id=inline ".to_string());
        assert_eq!(session.resolve_cookie().unwrap().as_deref(), Some("session-id=inline"));
    }
}
