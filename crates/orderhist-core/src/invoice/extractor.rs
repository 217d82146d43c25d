//! Invoice extractor: one page in, one order and its items out.

use tracing::{debug, info};

use super::document::InvoiceDocument;
use super::rules::{FieldExtractor, FieldRule, ITEM_RULES, ORDER_RULES};
use crate::error::FieldError;
use crate::models::record::{ItemField, ItemRecord, OrderField, OrderRecord};

/// A field or item cell that fell back to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMiss {
    /// Item row the cell belongs to; `None` for order fields.
    pub item_index: Option<usize>,
    pub error: FieldError,
}

/// Result of extracting one invoice page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub order: OrderRecord,
    pub items: Vec<ItemRecord>,
    /// Fields and cells left empty, with the reason.
    pub misses: Vec<FieldMiss>,
}

impl Extraction {
    /// Number of items found on the page.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Rows of one order's items, filled one field sequence at a time.
#[derive(Debug)]
struct ItemRows {
    rows: Vec<ItemRecord>,
}

impl ItemRows {
    fn new(order_number: &str, count: usize) -> Self {
        Self {
            rows: vec![ItemRecord::for_order(order_number); count],
        }
    }

    /// Merge one field's sequence into the rows by index. Failed cells stay
    /// empty and are reported in `misses`.
    fn merge(
        &mut self,
        field: ItemField,
        cells: Vec<Result<String, FieldError>>,
        misses: &mut Vec<FieldMiss>,
    ) {
        for (index, (row, cell)) in self.rows.iter_mut().zip(cells).enumerate() {
            match cell {
                Ok(value) => row.set(field, value),
                Err(error) => misses.push(FieldMiss {
                    item_index: Some(index),
                    error,
                }),
            }
        }
    }
}

/// Extracts orders and items from invoice (print view) pages.
///
/// Extraction never fails: a field whose anchor is missing or whose markup
/// differs from the expected layout is left empty, and every other field
/// and item is still extracted.
pub struct InvoiceExtractor {
    order_rules: &'static [FieldRule<OrderField>],
    item_rules: &'static [FieldRule<ItemField>],
}

impl InvoiceExtractor {
    /// Create an extractor with the built-in rule tables.
    pub fn new() -> Self {
        Self {
            order_rules: &ORDER_RULES,
            item_rules: &ITEM_RULES,
        }
    }

    /// Parse and extract an HTML page.
    pub fn extract_html(&self, html: &str) -> Extraction {
        self.extract(&InvoiceDocument::parse(html))
    }

    /// Extract a parsed page.
    pub fn extract(&self, doc: &InvoiceDocument) -> Extraction {
        let mut misses = Vec::new();

        let order = self.extract_order(doc, &mut misses);
        let items = self.extract_items(doc, &order.order_number, &mut misses);

        for miss in &misses {
            debug!(item = ?miss.item_index, "{}", miss.error);
        }
        info!(
            "Extracted order {} with {} items ({} empty fields)",
            order.order_number,
            items.len(),
            misses.len()
        );

        Extraction {
            order,
            items,
            misses,
        }
    }

    fn extract_order(&self, doc: &InvoiceDocument, misses: &mut Vec<FieldMiss>) -> OrderRecord {
        let mut values: [String; 10] = Default::default();

        for rule in self.order_rules {
            match rule.extract(doc) {
                Ok(value) => values[rule.field as usize] = value,
                Err(error) => misses.push(FieldMiss {
                    item_index: None,
                    error,
                }),
            }
        }

        OrderRecord::from_values(values)
    }

    fn extract_items(
        &self,
        doc: &InvoiceDocument,
        order_number: &str,
        misses: &mut Vec<FieldMiss>,
    ) -> Vec<ItemRecord> {
        let sequences: Vec<(ItemField, Vec<Result<String, FieldError>>)> = self
            .item_rules
            .iter()
            .map(|rule| (rule.field, rule.extract_all(doc)))
            .collect();

        // The longest sequence sets the row count, so an under-detected
        // field never drops an item.
        let item_count = sequences.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);

        let mut rows = ItemRows::new(order_number, item_count);
        for (field, cells) in sequences {
            rows.merge(field, cells, misses);
        }
        rows.rows
    }
}

impl Default for InvoiceExtractor {
    fn default() -> Self {
        Self::new()
    }
}
