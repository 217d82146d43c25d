//! Append-only orders and items tables.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::models::record::{ITEM_COLUMNS, ItemRecord, ORDER_COLUMNS, OrderRecord};

/// File name of the orders table.
pub const ORDERS_FILE: &str = "orders.csv";

/// File name of the items table.
pub const ITEMS_FILE: &str = "items.csv";

/// Destination for extracted records.
///
/// Rows are only ever appended; writing the same order twice produces two
/// rows.
pub trait TabularSink {
    /// Append one order row.
    fn append_order(&mut self, order: &OrderRecord) -> Result<()>;

    /// Append the item rows of one order.
    fn append_items(&mut self, items: &[ItemRecord]) -> Result<()>;
}

/// Orders and items tables as two CSV files in one directory.
pub struct CsvSink {
    orders: csv::Writer<File>,
    items: csv::Writer<File>,
    orders_path: PathBuf,
    items_path: PathBuf,
}

impl CsvSink {
    /// Create both tables in `dir`, replacing existing files, and write
    /// their header rows.
    pub fn create(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let orders_path = dir.join(ORDERS_FILE);
        let items_path = dir.join(ITEMS_FILE);

        let mut orders = writer(File::create(&orders_path)?);
        orders.write_record(ORDER_COLUMNS)?;
        orders.flush()?;

        let mut items = writer(File::create(&items_path)?);
        items.write_record(ITEM_COLUMNS)?;
        items.flush()?;

        debug!("Created {} and {}", orders_path.display(), items_path.display());

        Ok(Self {
            orders,
            items,
            orders_path,
            items_path,
        })
    }

    /// Open existing tables in `dir` for appending, without writing headers.
    pub fn open(dir: &Path) -> Result<Self> {
        let orders_path = dir.join(ORDERS_FILE);
        let items_path = dir.join(ITEMS_FILE);

        let append = |path: &Path| OpenOptions::new().append(true).open(path);
        Ok(Self {
            orders: writer(append(&orders_path)?),
            items: writer(append(&items_path)?),
            orders_path,
            items_path,
        })
    }

    pub fn orders_path(&self) -> &Path {
        &self.orders_path
    }

    pub fn items_path(&self) -> &Path {
        &self.items_path
    }
}

fn writer(file: File) -> csv::Writer<File> {
    csv::WriterBuilder::new().has_headers(false).from_writer(file)
}

impl TabularSink for CsvSink {
    fn append_order(&mut self, order: &OrderRecord) -> Result<()> {
        self.orders.write_record(order.to_row())?;
        self.orders.flush()?;
        Ok(())
    }

    fn append_items(&mut self, items: &[ItemRecord]) -> Result<()> {
        for item in items {
            self.items.write_record(item.to_row())?;
        }
        self.items.flush()?;
        Ok(())
    }
}

/// Read every row of a table written by [`CsvSink`].
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn order(number: &str) -> OrderRecord {
        OrderRecord {
            order_number: number.to_string(),
            order_grand_total: "1,234.56".to_string(),
            ..OrderRecord::default()
        }
    }

    #[test]
    fn test_header_written_once_and_rows_appended() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::create(dir.path()).unwrap();

        sink.append_order(&order("111")).unwrap();
        sink.append_order(&order("111")).unwrap();
        let mut item = ItemRecord::for_order("111");
        item.item_description = "Café crème, 12 × 8 oz".to_string();
        sink.append_items(&[item.clone(), item.clone()]).unwrap();

        let orders = std::fs::read_to_string(sink.orders_path()).unwrap();
        let mut lines = orders.lines();
        assert_eq!(lines.next().unwrap(), ORDER_COLUMNS.join(","));
        assert_eq!(lines.count(), 2);

        let items: Vec<ItemRecord> = read_table(sink.items_path()).unwrap();
        assert_eq!(items, vec![item.clone(), item]);

        let orders: Vec<OrderRecord> = read_table(sink.orders_path()).unwrap();
        assert_eq!(orders[0].order_grand_total, "1,234.56");
    }

    #[test]
    fn test_open_appends_without_header() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut sink = CsvSink::create(dir.path()).unwrap();
            sink.append_order(&order("111")).unwrap();
        }

        let mut sink = CsvSink::open(dir.path()).unwrap();
        sink.append_order(&order("222")).unwrap();

        let orders: Vec<OrderRecord> = read_table(&dir.path().join(ORDERS_FILE)).unwrap();
        let numbers: Vec<_> = orders.iter().map(|o| o.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["111", "222"]);
    }

    #[test]
    fn test_create_truncates_existing_tables() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut sink = CsvSink::create(dir.path()).unwrap();
            sink.append_order(&order("111")).unwrap();
        }
        CsvSink::create(dir.path()).unwrap();

        let orders: Vec<OrderRecord> = read_table(&dir.path().join(ORDERS_FILE)).unwrap();
        assert!(orders.is_empty());
    }
}
