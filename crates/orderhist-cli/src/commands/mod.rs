//! Subcommands and the helpers they share.

pub mod config;
pub mod crawl;
pub mod download;
pub mod extract;
pub mod merge;
pub mod run;
pub mod scrape;

use std::path::{Path, PathBuf};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use orderhist_core::OrderhistConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("orderhist")
        .join("config.json")
}

/// Config file in effect: the `--config` path, or the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration. An explicit path must exist; the default location
/// falls back to built-in defaults when absent.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<OrderhistConfig> {
    match config_path {
        Some(path) => Ok(OrderhistConfig::from_file(Path::new(path))?),
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Loading config from {}", path.display());
                Ok(OrderhistConfig::from_file(&path)?)
            } else {
                Ok(OrderhistConfig::default())
            }
        }
    }
}

/// Account selection shared by the phase commands.
#[derive(Args)]
pub struct AccountArgs {
    /// Account name (overrides account.name)
    #[arg(short, long)]
    pub account: Option<String>,

    /// Directory holding account directories (overrides account.output_dir)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl AccountArgs {
    pub fn apply(&self, config: &mut OrderhistConfig) {
        if let Some(name) = &self.account {
            config.account.name = name.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.account.output_dir = dir.clone();
        }
    }
}

/// Progress bar for a known number of pages.
pub fn page_progress(len: usize, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {unit} {{msg}}"
        ))
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
