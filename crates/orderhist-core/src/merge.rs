//! Join items with their orders' placement dates.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::record::{ItemRecord, ORDER_ITEM_COLUMNS, OrderItemRecord, OrderRecord};
use crate::sink::read_table;

const DATE_FORMATS: [&str; 4] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Normalize a placement date to `YYYY-MM-DD`.
///
/// Returns `None` for text in none of the known formats.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Inner-join `items` with `orders` on the order number, in item order.
///
/// An item matching several order rows appears once per match. Items
/// without an order number, or whose order is absent, are dropped.
pub fn join_items(items: Vec<ItemRecord>, orders: &[OrderRecord]) -> Vec<OrderItemRecord> {
    let mut dates: HashMap<&str, Vec<String>> = HashMap::new();
    for order in orders {
        if order.order_number.is_empty() {
            continue;
        }
        dates
            .entry(order.order_number.as_str())
            .or_default()
            .push(placed_date(order));
    }

    let mut joined = Vec::new();
    for item in items {
        let Some(order_dates) = dates.get(item.order_number.as_str()) else {
            continue;
        };
        for date in order_dates {
            joined.push(OrderItemRecord::new(item.clone(), date.clone()));
        }
    }
    joined
}

fn placed_date(order: &OrderRecord) -> String {
    let raw = order.order_placed_date.trim();
    if raw.is_empty() {
        return String::new();
    }
    normalize_date(raw).unwrap_or_else(|| {
        warn!(
            "Unrecognized date {:?} for order {}; keeping it as is",
            raw, order.order_number
        );
        raw.to_string()
    })
}

/// Read the orders and items tables, join them and write the result to
/// `output`. Returns the number of rows written.
pub fn merge_tables(orders_path: &Path, items_path: &Path, output: &Path) -> Result<usize> {
    let orders: Vec<OrderRecord> = read_table(orders_path)?;
    let items: Vec<ItemRecord> = read_table(items_path)?;
    let item_count = items.len();

    let joined = join_items(items, &orders);

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(ORDER_ITEM_COLUMNS)?;
    for row in &joined {
        writer.write_record(row.to_row())?;
    }
    writer.flush()?;

    info!(
        "Joined {} of {} items with {} orders into {}",
        joined.len(),
        item_count,
        orders.len(),
        output.display()
    );
    Ok(joined.len())
}
