//! Order and item records, one row each in the output tables.

use serde::{Deserialize, Serialize};

/// Column names of the orders table, in write order.
pub const ORDER_COLUMNS: [&str; 10] = [
    "orderNumber",
    "orderPlacedDate",
    "orderTotal",
    "orderSubtotal",
    "orderShippingAndHandling",
    "orderTotalPreTax",
    "orderTax",
    "orderGrandTotal",
    "paymentMethod",
    "creditCard",
];

/// Column names of the items table, in write order.
pub const ITEM_COLUMNS: [&str; 6] = [
    "orderNumber",
    "itemQuantity",
    "itemDescription",
    "itemSeller",
    "itemCondition",
    "itemPrice",
];

/// Column names of the merged order-items table.
pub const ORDER_ITEM_COLUMNS: [&str; 7] = [
    "orderNumber",
    "itemQuantity",
    "itemDescription",
    "itemSeller",
    "itemCondition",
    "itemPrice",
    "orderPlacedDate",
];

/// One order, as extracted from a single invoice page.
///
/// Every field is kept as the text found on the page. Money fields have the
/// currency symbol removed but are otherwise untouched; any field may be
/// empty when it could not be located.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_number: String,
    pub order_placed_date: String,
    pub order_total: String,
    pub order_subtotal: String,
    pub order_shipping_and_handling: String,
    pub order_total_pre_tax: String,
    pub order_tax: String,
    pub order_grand_total: String,
    pub payment_method: String,
    pub credit_card: String,
}

/// Order-level fields, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    OrderNumber,
    OrderPlacedDate,
    OrderTotal,
    OrderSubtotal,
    OrderShippingAndHandling,
    OrderTotalPreTax,
    OrderTax,
    OrderGrandTotal,
    PaymentMethod,
    CreditCard,
}

impl OrderField {
    /// All order fields in table order.
    pub const ALL: [OrderField; 10] = [
        OrderField::OrderNumber,
        OrderField::OrderPlacedDate,
        OrderField::OrderTotal,
        OrderField::OrderSubtotal,
        OrderField::OrderShippingAndHandling,
        OrderField::OrderTotalPreTax,
        OrderField::OrderTax,
        OrderField::OrderGrandTotal,
        OrderField::PaymentMethod,
        OrderField::CreditCard,
    ];

    /// Column name in the orders table.
    pub fn column(self) -> &'static str {
        ORDER_COLUMNS[self as usize]
    }
}

impl OrderRecord {
    /// Build a record from values indexed by [`OrderField`] position.
    pub fn from_values(values: [String; 10]) -> Self {
        let [
            order_number,
            order_placed_date,
            order_total,
            order_subtotal,
            order_shipping_and_handling,
            order_total_pre_tax,
            order_tax,
            order_grand_total,
            payment_method,
            credit_card,
        ] = values;

        Self {
            order_number,
            order_placed_date,
            order_total,
            order_subtotal,
            order_shipping_and_handling,
            order_total_pre_tax,
            order_tax,
            order_grand_total,
            payment_method,
            credit_card,
        }
    }

    /// Get a field value by name.
    pub fn get(&self, field: OrderField) -> &str {
        match field {
            OrderField::OrderNumber => &self.order_number,
            OrderField::OrderPlacedDate => &self.order_placed_date,
            OrderField::OrderTotal => &self.order_total,
            OrderField::OrderSubtotal => &self.order_subtotal,
            OrderField::OrderShippingAndHandling => &self.order_shipping_and_handling,
            OrderField::OrderTotalPreTax => &self.order_total_pre_tax,
            OrderField::OrderTax => &self.order_tax,
            OrderField::OrderGrandTotal => &self.order_grand_total,
            OrderField::PaymentMethod => &self.payment_method,
            OrderField::CreditCard => &self.credit_card,
        }
    }

    /// Values in table column order.
    pub fn to_row(&self) -> [&str; 10] {
        OrderField::ALL.map(|field| self.get(field))
    }
}

/// One line item of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub order_number: String,
    pub item_quantity: String,
    pub item_description: String,
    pub item_seller: String,
    pub item_condition: String,
    pub item_price: String,
}

/// Item-level fields scraped as independent sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Quantity,
    Description,
    Seller,
    Condition,
    Price,
}

impl ItemField {
    /// All item fields in table order.
    pub const ALL: [ItemField; 5] = [
        ItemField::Quantity,
        ItemField::Description,
        ItemField::Seller,
        ItemField::Condition,
        ItemField::Price,
    ];

    /// Column name in the items table.
    pub fn column(self) -> &'static str {
        ITEM_COLUMNS[self as usize + 1]
    }
}

impl ItemRecord {
    /// Empty row belonging to `order_number`.
    pub fn for_order(order_number: &str) -> Self {
        Self {
            order_number: order_number.to_string(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: ItemField) -> &str {
        match field {
            ItemField::Quantity => &self.item_quantity,
            ItemField::Description => &self.item_description,
            ItemField::Seller => &self.item_seller,
            ItemField::Condition => &self.item_condition,
            ItemField::Price => &self.item_price,
        }
    }

    pub(crate) fn set(&mut self, field: ItemField, value: String) {
        let slot = match field {
            ItemField::Quantity => &mut self.item_quantity,
            ItemField::Description => &mut self.item_description,
            ItemField::Seller => &mut self.item_seller,
            ItemField::Condition => &mut self.item_condition,
            ItemField::Price => &mut self.item_price,
        };
        *slot = value;
    }

    /// Values in table column order.
    pub fn to_row(&self) -> [&str; 6] {
        [
            &self.order_number,
            &self.item_quantity,
            &self.item_description,
            &self.item_seller,
            &self.item_condition,
            &self.item_price,
        ]
    }
}

/// An item joined with its order's placement date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRecord {
    pub order_number: String,
    pub item_quantity: String,
    pub item_description: String,
    pub item_seller: String,
    pub item_condition: String,
    pub item_price: String,
    pub order_placed_date: String,
}

impl OrderItemRecord {
    pub fn new(item: ItemRecord, order_placed_date: String) -> Self {
        Self {
            order_number: item.order_number,
            item_quantity: item.item_quantity,
            item_description: item.item_description,
            item_seller: item.item_seller,
            item_condition: item.item_condition,
            item_price: item.item_price,
            order_placed_date,
        }
    }

    /// Values in table column order.
    pub fn to_row(&self) -> [&str; 7] {
        [
            &self.order_number,
            &self.item_quantity,
            &self.item_description,
            &self.item_seller,
            &self.item_condition,
            &self.item_price,
            &self.order_placed_date,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_columns_match_tables() {
        let order_columns: Vec<_> = OrderField::ALL.iter().map(|f| f.column()).collect();
        assert_eq!(order_columns, ORDER_COLUMNS.to_vec());

        let item_columns: Vec<_> = ItemField::ALL.iter().map(|f| f.column()).collect();
        assert_eq!(item_columns, ITEM_COLUMNS[1..].to_vec());
    }

    #[test]
    fn test_serde_uses_column_names() {
        let record = OrderRecord {
            order_number: "111-222".to_string(),
            order_shipping_and_handling: "0.00".to_string(),
            ..OrderRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["orderNumber"], "111-222");
        assert_eq!(json["orderShippingAndHandling"], "0.00");
        assert_eq!(json.as_object().unwrap().len(), ORDER_COLUMNS.len());
    }

    #[test]
    fn test_item_set_and_row() {
        let mut item = ItemRecord::for_order("111-222");
        item.set(ItemField::Seller, "Acme".to_string());

        assert_eq!(item.get(ItemField::Seller), "Acme");
        assert_eq!(item.to_row(), ["111-222", "", "", "Acme", "", ""]);
    }
}
