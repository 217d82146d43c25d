//! Order-level field rules.
//!
//! Summary amounts sit in a two-cell row (`<td>Label:</td><td>$1.00</td>`),
//! so they hop to the next element. Header fields follow their bold label in
//! the same cell, so they hop to the next text.

use lazy_static::lazy_static;

use super::patterns::*;
use super::{Clean, FieldRule, Hop};
use crate::models::record::OrderField;

const MONEY: &[Clean] = &[Clean::StripCurrency, Clean::Trim];

lazy_static! {
    /// Rules for every order field, in extraction order.
    pub static ref ORDER_RULES: Vec<FieldRule<OrderField>> = vec![
        FieldRule {
            field: OrderField::OrderNumber,
            anchor: &ORDER_NUMBER,
            label_tail: true,
            hops: &[Hop::NextText],
            clean: &[Clean::Trim],
        },
        FieldRule {
            field: OrderField::OrderPlacedDate,
            anchor: &ORDER_PLACED,
            label_tail: true,
            hops: &[Hop::NextText],
            clean: &[Clean::Trim],
        },
        FieldRule {
            field: OrderField::OrderTotal,
            anchor: &ORDER_TOTAL,
            label_tail: true,
            hops: &[Hop::NextTextContaining("$")],
            clean: MONEY,
        },
        FieldRule {
            field: OrderField::OrderSubtotal,
            anchor: &ITEMS_SUBTOTAL,
            label_tail: true,
            hops: &[Hop::NextElement],
            clean: MONEY,
        },
        FieldRule {
            field: OrderField::OrderShippingAndHandling,
            anchor: &SHIPPING_AND_HANDLING,
            label_tail: true,
            hops: &[Hop::NextElement],
            clean: MONEY,
        },
        FieldRule {
            field: OrderField::OrderTotalPreTax,
            anchor: &TOTAL_BEFORE_TAX,
            label_tail: true,
            hops: &[Hop::NextElement],
            clean: MONEY,
        },
        FieldRule {
            field: OrderField::OrderTax,
            anchor: &ESTIMATED_TAX,
            label_tail: true,
            hops: &[Hop::NextElement],
            clean: MONEY,
        },
        FieldRule {
            field: OrderField::OrderGrandTotal,
            anchor: &GRAND_TOTAL,
            label_tail: true,
            hops: &[Hop::NextElement],
            clean: MONEY,
        },
        FieldRule {
            field: OrderField::PaymentMethod,
            anchor: &PAYMENT_METHOD,
            label_tail: true,
            hops: &[Hop::NextText],
            clean: &[Clean::Trim],
        },
        FieldRule {
            field: OrderField::CreditCard,
            anchor: &CARD_ENDING_IN,
            label_tail: false,
            hops: &[],
            clean: &[Clean::BeforeColon, Clean::Trim],
        },
    ];
}
