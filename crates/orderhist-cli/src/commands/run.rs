//! Run command - execute the selected phases in order.

use clap::Args;
use console::style;

use orderhist_core::SessionFetcher;
use orderhist_core::models::config::PhaseConfig;

use super::{AccountArgs, crawl, download, load_config, scrape};

/// Arguments for the run command.
///
/// Without phase flags, the config's `phases` section decides.
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    account: AccountArgs,

    /// Crawl order history for invoice URLs
    #[arg(long)]
    crawl: bool,

    /// Download invoice pages
    #[arg(long)]
    download: bool,

    /// Scrape saved pages into tables
    #[arg(long)]
    scrape: bool,
}

impl RunArgs {
    fn phases(&self, configured: &PhaseConfig) -> PhaseConfig {
        if self.crawl || self.download || self.scrape {
            PhaseConfig {
                crawl: self.crawl,
                download: self.download,
                scrape: self.scrape,
            }
        } else {
            configured.clone()
        }
    }
}

pub async fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    args.account.apply(&mut config);
    config.validate()?;

    let phases = args.phases(&config.phases);
    if !(phases.crawl || phases.download || phases.scrape) {
        anyhow::bail!(
            "No phase selected.\n\nPass --crawl, --download or --scrape, \
             or enable phases with 'orderhist config set phases.scrape true'."
        );
    }

    if phases.crawl || phases.download {
        let mut fetcher = SessionFetcher::new(&config.session, config.download.settle_secs)?;
        let mut result = Ok(());
        if phases.crawl {
            println!("{} Crawling order history", style("→").cyan());
            result = crawl::execute(&mut fetcher, &config).await;
        }
        if result.is_ok() && phases.download {
            println!("{} Downloading invoice pages", style("→").cyan());
            result = download::execute(&mut fetcher, &config).await;
        }
        fetcher.stop();
        result?;
    }

    if phases.scrape {
        println!("{} Scraping saved pages", style("→").cyan());
        scrape::execute(&config, false)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(crawl: bool, download: bool, scrape: bool) -> RunArgs {
        RunArgs {
            account: AccountArgs {
                account: None,
                output_dir: None,
            },
            crawl,
            download,
            scrape,
        }
    }

    #[test]
    fn test_flags_override_configured_phases() {
        let configured = PhaseConfig {
            crawl: true,
            download: true,
            scrape: false,
        };

        let phases = args(false, false, true).phases(&configured);
        assert_eq!(phases, PhaseConfig { crawl: false, download: false, scrape: true });

        let phases = args(false, false, false).phases(&configured);
        assert_eq!(phases, configured);
    }
}
