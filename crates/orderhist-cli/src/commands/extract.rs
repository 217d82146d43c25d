//! Extract command - extract one saved invoice page.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use orderhist_core::models::record::{ITEM_COLUMNS, ORDER_COLUMNS};
use orderhist_core::{Extraction, InvoiceExtractor, ItemRecord, OrderRecord};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Saved invoice page (HTML)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List fields that could not be located
    #[arg(long)]
    show_misses: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (orders table, blank line, items table)
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
struct ExtractOutput<'a> {
    order: &'a OrderRecord,
    items: &'a [ItemRecord],
}

pub fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting {}", args.input.display());
    let html = String::from_utf8_lossy(&fs::read(&args.input)?).into_owned();
    let extraction = InvoiceExtractor::new().extract_html(&html);

    let output = format_extraction(&extraction, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_misses {
        eprintln!();
        if extraction.misses.is_empty() {
            eprintln!("{} Every field was located", style("ℹ").blue());
        }
        for miss in &extraction.misses {
            match miss.item_index {
                Some(index) => eprintln!("  - item {}: {}", index + 1, miss.error),
                None => eprintln!("  - {}", miss.error),
            }
        }
    }

    debug!("Total extraction time: {:?}", start.elapsed());

    Ok(())
}

fn format_extraction(extraction: &Extraction, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ExtractOutput {
            order: &extraction.order,
            items: &extraction.items,
        })?),
        OutputFormat::Csv => format_csv(extraction),
        OutputFormat::Text => Ok(format_text(extraction)),
    }
}

fn format_csv(extraction: &Extraction) -> anyhow::Result<String> {
    let mut orders = csv::Writer::from_writer(vec![]);
    orders.write_record(ORDER_COLUMNS)?;
    orders.write_record(extraction.order.to_row())?;

    let mut items = csv::Writer::from_writer(vec![]);
    items.write_record(ITEM_COLUMNS)?;
    for item in &extraction.items {
        items.write_record(item.to_row())?;
    }

    let orders = String::from_utf8(orders.into_inner()?)?;
    let items = String::from_utf8(items.into_inner()?)?;
    Ok(format!("{orders}\n{items}"))
}

fn format_text(extraction: &Extraction) -> String {
    let order = &extraction.order;
    let mut output = String::new();

    output.push_str(&format!("Order: {}\n", order.order_number));
    output.push_str(&format!("Placed: {}\n", order.order_placed_date));
    output.push('\n');

    output.push_str(&format!("Items ({}):\n", extraction.item_count()));
    for item in &extraction.items {
        output.push_str(&format!(
            "  {} x {}  ${}\n",
            item.item_quantity, item.item_description, item.item_price
        ));
        if !item.item_seller.is_empty() || !item.item_condition.is_empty() {
            output.push_str(&format!(
                "      sold by {}, {}\n",
                item.item_seller, item.item_condition
            ));
        }
    }
    output.push('\n');

    output.push_str("Summary:\n");
    output.push_str(&format!("  Subtotal:    ${}\n", order.order_subtotal));
    output.push_str(&format!("  Shipping:    ${}\n", order.order_shipping_and_handling));
    output.push_str(&format!("  Before tax:  ${}\n", order.order_total_pre_tax));
    output.push_str(&format!("  Tax:         ${}\n", order.order_tax));
    output.push_str(&format!("  Grand total: ${}\n", order.order_grand_total));

    if !order.payment_method.is_empty() {
        output.push_str(&format!("\nPaid with: {}\n", order.payment_method));
    }
    if !order.credit_card.is_empty() {
        output.push_str(&format!("Charged to: {}\n", order.credit_card));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extraction() -> Extraction {
        InvoiceExtractor::new().extract_html(
            "<html><body><p>Amazon.com order number: 111-2223334-5556667</p>\
             <p>2 of: <i>Widget, blue</i></p><p>Condition: New</p><p>$3.50</p></body></html>",
        )
    }

    #[test]
    fn test_csv_has_both_tables() {
        let csv = format_csv(&extraction()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], ORDER_COLUMNS.join(","));
        assert!(lines[1].starts_with("111-2223334-5556667,"));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], ITEM_COLUMNS.join(","));
        assert_eq!(lines[4], "111-2223334-5556667,2,\"Widget, blue\",,New,3.50");
    }

    #[test]
    fn test_json_uses_column_names() {
        let json = format_extraction(&extraction(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["order"]["orderNumber"], "111-2223334-5556667");
        assert_eq!(value["items"][0]["itemPrice"], "3.50");
    }

    #[test]
    fn test_text_summary() {
        let text = format_text(&extraction());
        assert!(text.contains("Order: 111-2223334-5556667"));
        assert!(text.contains("2 x Widget, blue  $3.50"));
    }
}
