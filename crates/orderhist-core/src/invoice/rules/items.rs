//! Item-level field rules, each applied at every anchor on the page.
//!
//! An item block looks like
//! `1 of: <i>Widget</i><br>Sold by: Acme (<a>profile</a>)<br>Condition: New`
//! with the price in the next cell, or `1 of: Widget $9.99` with the price on
//! the quantity line.

use lazy_static::lazy_static;

use super::patterns::*;
use super::{Clean, FieldRule, Hop};
use crate::models::record::ItemField;

lazy_static! {
    /// Rules for every item field, in table order.
    pub static ref ITEM_RULES: Vec<FieldRule<ItemField>> = vec![
        FieldRule {
            field: ItemField::Quantity,
            anchor: &ITEM_QUANTITY_OF,
            label_tail: false,
            hops: &[],
            clean: &[Clean::BeforeAnchor, Clean::Trim],
        },
        FieldRule {
            field: ItemField::Description,
            anchor: &ITEM_QUANTITY_OF,
            label_tail: true,
            hops: &[Hop::NextElement],
            clean: &[Clean::DropTrailingAmount, Clean::Trim],
        },
        FieldRule {
            field: ItemField::Seller,
            anchor: &SOLD_BY,
            label_tail: false,
            hops: &[],
            clean: &[Clean::AfterAnchor, Clean::Trim, Clean::TrimTrailingParen],
        },
        FieldRule {
            field: ItemField::Condition,
            anchor: &CONDITION,
            label_tail: false,
            hops: &[],
            clean: &[Clean::AfterAnchor, Clean::Trim],
        },
        FieldRule {
            field: ItemField::Price,
            anchor: &ITEM_QUANTITY_OF,
            label_tail: false,
            hops: &[Hop::AmountBeforeNextAnchor],
            clean: &[Clean::Amount],
        },
    ];
}
