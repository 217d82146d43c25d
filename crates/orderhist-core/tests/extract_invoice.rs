//! End-to-end extraction of a saved invoice (print view) page.

use pretty_assertions::assert_eq;

use orderhist_core::{InvoiceExtractor, ItemRecord, OrderRecord};

const INVOICE: &str = include_str!("fixtures/invoice.html");

fn item(quantity: &str, description: &str, seller: &str, price: &str) -> ItemRecord {
    ItemRecord {
        order_number: "111-2223334-5556667".to_string(),
        item_quantity: quantity.to_string(),
        item_description: description.to_string(),
        item_seller: seller.to_string(),
        item_condition: "New".to_string(),
        item_price: price.to_string(),
    }
}

#[test]
fn extracts_every_order_field() {
    let extraction = InvoiceExtractor::new().extract_html(INVOICE);

    assert_eq!(
        extraction.order,
        OrderRecord {
            order_number: "111-2223334-5556667".to_string(),
            order_placed_date: "March 3, 2023".to_string(),
            order_total: "43.17".to_string(),
            order_subtotal: "39.97".to_string(),
            order_shipping_and_handling: "0.00".to_string(),
            order_total_pre_tax: "39.97".to_string(),
            order_tax: "3.20".to_string(),
            order_grand_total: "43.17".to_string(),
            payment_method: "Visa | Last digits: 1234".to_string(),
            credit_card: "Visa ending in 1234".to_string(),
        }
    );
    assert!(extraction.misses.is_empty(), "unexpected misses: {:?}", extraction.misses);
}

#[test]
fn extracts_items_in_page_order() {
    let extraction = InvoiceExtractor::new().extract_html(INVOICE);

    assert_eq!(extraction.item_count(), 2);
    assert_eq!(
        extraction.items,
        vec![
            item("1", "Stainless Steel Water Bottle, 24 oz", "Acme Outfitters", "24.99"),
            item("2", "USB-C Cable (2-pack)", "Amazon.com Services LLC", "7.49"),
        ]
    );
}

#[test]
fn damaged_page_still_yields_one_order() {
    let damaged = INVOICE.replace("Grand Total:", "Total:").replace("Sold by:", "Seller");
    let extraction = InvoiceExtractor::new().extract_html(&damaged);

    assert_eq!(extraction.order.order_number, "111-2223334-5556667");
    assert_eq!(extraction.order.order_grand_total, "");
    assert_eq!(extraction.order.order_tax, "3.20");
    assert_eq!(extraction.item_count(), 2);
    assert!(extraction.items.iter().all(|i| i.item_seller.is_empty()));
    assert!(extraction.items.iter().all(|i| !i.item_price.is_empty()));
}
