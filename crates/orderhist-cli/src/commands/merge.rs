//! Merge command - join items with order dates.

use std::path::PathBuf;

use clap::Args;
use console::style;

use orderhist_core::{AccountDir, merge_tables};

use super::{AccountArgs, load_config};

/// Arguments for the merge command.
#[derive(Args)]
pub struct MergeArgs {
    #[command(flatten)]
    account: AccountArgs,

    /// Output file (default: order_items.csv in the account directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: MergeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    args.account.apply(&mut config);

    let account = AccountDir::new(config.account_dir());
    for table in [account.orders_table(), account.items_table()] {
        if !table.exists() {
            anyhow::bail!(
                "Table not found: {}.\n\nRun 'orderhist scrape' first.",
                table.display()
            );
        }
    }

    let output = args.output.unwrap_or_else(|| account.order_items_table());
    let rows = merge_tables(&account.orders_table(), &account.items_table(), &output)?;

    println!(
        "{} Wrote {} rows to {}",
        style("✓").green(),
        rows,
        output.display()
    );

    Ok(())
}
