//! Anchor patterns for invoice (print view) pages.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Order header
    pub static ref ORDER_PLACED: Regex = Regex::new(r"Order\s+Placed:").unwrap();

    pub static ref ORDER_NUMBER: Regex = Regex::new(
        r"Amazon\.com\s+order\s+number:"
    ).unwrap();

    pub static ref ORDER_TOTAL: Regex = Regex::new(r"Order\s+Total").unwrap();

    // Payment summary
    pub static ref ITEMS_SUBTOTAL: Regex = Regex::new(r"Item\(s\)\s+Subtotal:").unwrap();

    pub static ref SHIPPING_AND_HANDLING: Regex = Regex::new(
        r"Shipping\s*&\s*Handling:"
    ).unwrap();

    pub static ref TOTAL_BEFORE_TAX: Regex = Regex::new(r"Total\s+before\s+tax:").unwrap();

    pub static ref ESTIMATED_TAX: Regex = Regex::new(
        r"Estimated\s+tax\s+to\s+be\s+collected:"
    ).unwrap();

    pub static ref GRAND_TOTAL: Regex = Regex::new(r"Grand\s+Total:").unwrap();

    pub static ref PAYMENT_METHOD: Regex = Regex::new(r"Payment\s+Method:").unwrap();

    // Card transaction line, e.g. "Visa ending in 1234: March 4, 2023:"
    pub static ref CARD_ENDING_IN: Regex = Regex::new(r"ending\s+in").unwrap();

    // Items ordered
    pub static ref ITEM_QUANTITY_OF: Regex = Regex::new(r"of:").unwrap();

    pub static ref SOLD_BY: Regex = Regex::new(r"Sold\s+by:").unwrap();

    pub static ref CONDITION: Regex = Regex::new(r"Condition:").unwrap();

    // Money amount; the numeral is group 1.
    pub static ref AMOUNT: Regex = Regex::new(r"\$\s*(\d[\d,]*(?:\.\d+)?)").unwrap();

    // Price trailing a description on the same line: "Widget $9.99"
    pub static ref TRAILING_AMOUNT: Regex = Regex::new(
        r"\s*\$\s*\d[\d,]*(?:\.\d+)?\s*$"
    ).unwrap();
}
