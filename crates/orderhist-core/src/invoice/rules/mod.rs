//! Declarative anchor rules for invoice fields.
//!
//! A rule names an anchor pattern, a hop sequence from the anchor text node
//! to the value node, and cleanup steps for the value text. One executor runs
//! every rule; any failure comes back as a [`FieldError`] that callers turn
//! into an empty field.

pub mod items;
pub mod order;
pub mod patterns;

pub use items::ITEM_RULES;
pub use order::ORDER_RULES;
pub use patterns::*;

use regex::Regex;

use super::document::{InvoiceDocument, NodeId, NodeKind};
use crate::error::FieldError;
use crate::models::record::{ItemField, OrderField};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// Extract the field at its first anchor.
    fn extract(&self, doc: &InvoiceDocument) -> Result<String, FieldError>;

    /// Extract the field at every anchor, one result per anchor.
    fn extract_all(&self, doc: &InvoiceDocument) -> Vec<Result<String, FieldError>>;
}

/// A field that owns an output column.
pub trait Column: Copy {
    fn column(self) -> &'static str;
}

impl Column for OrderField {
    fn column(self) -> &'static str {
        OrderField::column(self)
    }
}

impl Column for ItemField {
    fn column(self) -> &'static str {
        ItemField::column(self)
    }
}

/// One step from the current node towards the value node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// Next element in document order.
    NextElement,
    /// Next non-blank text node in document order.
    NextText,
    /// Next text node containing the given string.
    NextTextContaining(&'static str),
    /// Text node holding an amount, starting at the current node and giving
    /// up at the next node that matches the rule's anchor.
    AmountBeforeNextAnchor,
}

impl Hop {
    fn apply(self, doc: &InvoiceDocument, from: NodeId, anchor: &Regex) -> Option<NodeId> {
        match self {
            Hop::NextElement => doc.next_element(from),
            Hop::NextText => doc.next_text(from),
            Hop::NextTextContaining(needle) => doc.next_text_containing(from, needle),
            Hop::AmountBeforeNextAnchor => doc.text_matching_until(from, &AMOUNT, anchor),
        }
    }
}

/// Cleanup applied to the raw value text, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clean {
    Trim,
    /// Remove every `$`.
    StripCurrency,
    /// Keep the text before the first `:`; the whole text when there is none.
    BeforeColon,
    /// Keep the text before the anchor match; the whole text when it does not match.
    BeforeAnchor,
    /// Keep the text after the anchor match; fails when it does not match.
    AfterAnchor,
    /// Drop a dangling `(` or a trailing `(...)` group.
    TrimTrailingParen,
    /// Drop a price at the end of the text.
    DropTrailingAmount,
    /// Keep only the numeral of the first `$` amount; fails when there is none.
    Amount,
}

impl Clean {
    fn apply(self, value: String, anchor: &Regex) -> Option<String> {
        let cleaned = match self {
            Clean::Trim => value.trim().to_string(),
            Clean::StripCurrency => value.replace('$', ""),
            Clean::BeforeColon => value.split(':').next().unwrap_or_default().to_string(),
            Clean::BeforeAnchor => match anchor.find(&value) {
                Some(m) => value[..m.start()].to_string(),
                None => value,
            },
            Clean::AfterAnchor => value[anchor.find(&value)?.end()..].to_string(),
            Clean::TrimTrailingParen => trim_trailing_paren(&value),
            Clean::DropTrailingAmount => TRAILING_AMOUNT.replace(&value, "").into_owned(),
            Clean::Amount => AMOUNT.captures(&value)?.get(1)?.as_str().to_string(),
        };
        Some(cleaned)
    }
}

fn trim_trailing_paren(value: &str) -> String {
    let value = value.trim_end();
    if let Some(stripped) = value.strip_suffix('(') {
        return stripped.trim_end().to_string();
    }
    if value.ends_with(')') {
        if let Some(open) = value.rfind(" (") {
            return value[..open].trim_end().to_string();
        }
    }
    value.to_string()
}

/// Where a field lives relative to its anchor and how to clean it.
#[derive(Debug, Clone)]
pub struct FieldRule<F> {
    pub field: F,
    pub anchor: &'static Regex,
    /// Use the anchor node's own text after the label when it is not blank,
    /// and only hop when the label stands alone.
    pub label_tail: bool,
    pub hops: &'static [Hop],
    pub clean: &'static [Clean],
}

impl<F: Column> FieldRule<F> {
    /// Anchor nodes for this rule, in document order.
    pub fn anchors(&self, doc: &InvoiceDocument) -> Vec<NodeId> {
        doc.find_all_text(self.anchor)
    }

    /// Resolve the value for one anchor node.
    pub fn resolve(&self, doc: &InvoiceDocument, anchor: NodeId) -> Result<String, FieldError> {
        let tail = if self.label_tail {
            self.label_tail_text(doc, anchor)
        } else {
            None
        };

        let raw = match tail {
            Some(tail) => tail,
            None => {
                let node = self.navigate(doc, anchor)?;
                value_text(doc, node)
            }
        };

        let mut value = raw;
        for step in self.clean {
            value = step
                .apply(value, self.anchor)
                .ok_or_else(|| self.mismatch(format!("{step:?} did not match the value")))?;
        }

        if value.is_empty() {
            return Err(self.mismatch("empty value".to_string()));
        }
        Ok(value)
    }

    fn label_tail_text(&self, doc: &InvoiceDocument, anchor: NodeId) -> Option<String> {
        let text = doc.text(anchor)?;
        let tail = &text[self.anchor.find(text)?.end()..];
        let tail = tail
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
            .trim_end();
        (!tail.is_empty()).then(|| tail.to_string())
    }

    fn navigate(&self, doc: &InvoiceDocument, anchor: NodeId) -> Result<NodeId, FieldError> {
        self.hops.iter().enumerate().try_fold(anchor, |node, (i, hop)| {
            hop.apply(doc, node, self.anchor)
                .ok_or_else(|| self.mismatch(format!("hop {} ({hop:?}) reached no node", i + 1)))
        })
    }

    fn mismatch(&self, reason: String) -> FieldError {
        FieldError::StructureMismatch {
            field: self.field.column().to_string(),
            reason,
        }
    }
}

impl<F: Column> FieldExtractor for FieldRule<F> {
    fn extract(&self, doc: &InvoiceDocument) -> Result<String, FieldError> {
        let anchor = doc.find_text(self.anchor).ok_or_else(|| FieldError::NotFound {
            field: self.field.column().to_string(),
        })?;
        self.resolve(doc, anchor)
    }

    fn extract_all(&self, doc: &InvoiceDocument) -> Vec<Result<String, FieldError>> {
        self.anchors(doc)
            .into_iter()
            .map(|anchor| self.resolve(doc, anchor))
            .collect()
    }
}

/// Text a value node stands for: its own text, or its subtree's text.
fn value_text(doc: &InvoiceDocument, node: NodeId) -> String {
    match doc.kind(node) {
        Some(NodeKind::Text(text)) => text.clone(),
        Some(NodeKind::Element(_)) => doc.text_content(node),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rule(
        anchor: &'static Regex,
        label_tail: bool,
        hops: &'static [Hop],
        clean: &'static [Clean],
    ) -> FieldRule<OrderField> {
        FieldRule {
            field: OrderField::OrderTotal,
            anchor,
            label_tail,
            hops,
            clean,
        }
    }

    #[test]
    fn test_label_tail_wins_over_hops() {
        let doc = InvoiceDocument::parse("<p>Order Total: $12.00</p><p>$99.00</p>");
        let rule = rule(
            &ORDER_TOTAL,
            true,
            &[Hop::NextTextContaining("$")],
            &[Clean::StripCurrency, Clean::Trim],
        );

        assert_eq!(rule.extract(&doc), Ok("12.00".to_string()));
    }

    #[test]
    fn test_hops_used_when_label_stands_alone() {
        let doc = InvoiceDocument::parse("<p><b>Order Total:</b></p><p>$99.00</p>");
        let rule = rule(
            &ORDER_TOTAL,
            true,
            &[Hop::NextTextContaining("$")],
            &[Clean::StripCurrency, Clean::Trim],
        );

        assert_eq!(rule.extract(&doc), Ok("99.00".to_string()));
    }

    #[test]
    fn test_missing_anchor_is_not_found() {
        let doc = InvoiceDocument::parse("<p>nothing here</p>");
        let rule = rule(&ORDER_TOTAL, false, &[], &[]);

        assert_eq!(
            rule.extract(&doc),
            Err(FieldError::NotFound {
                field: "orderTotal".to_string()
            })
        );
    }

    #[test]
    fn test_failed_hop_is_structure_mismatch() {
        let doc = InvoiceDocument::parse("<p>Order Total</p>");
        let rule = rule(&ORDER_TOTAL, false, &[Hop::NextTextContaining("$")], &[]);

        let err = rule.extract(&doc).unwrap_err();
        assert!(matches!(err, FieldError::StructureMismatch { .. }));
        assert_eq!(err.field(), "orderTotal");
    }

    #[test]
    fn test_clean_steps() {
        let anchor = &*SOLD_BY;
        let seller = "Sold by: Acme Corp (".to_string();

        let after = Clean::AfterAnchor.apply(seller, anchor).unwrap();
        let trimmed = Clean::Trim.apply(after, anchor).unwrap();
        assert_eq!(Clean::TrimTrailingParen.apply(trimmed, anchor).unwrap(), "Acme Corp");

        assert_eq!(Clean::AfterAnchor.apply("no label".to_string(), anchor), None);
        assert_eq!(
            Clean::BeforeColon.apply("Visa ending in 1234: May 1".to_string(), anchor).unwrap(),
            "Visa ending in 1234"
        );
        assert_eq!(
            Clean::DropTrailingAmount.apply("Widget $1,234.56".to_string(), anchor).unwrap(),
            "Widget"
        );
        assert_eq!(
            Clean::Amount.apply("$9.99 ($3.33 each)".to_string(), anchor).unwrap(),
            "9.99"
        );
        assert_eq!(
            Clean::Amount.apply("2 of: Widget $ 1,234.56".to_string(), anchor).unwrap(),
            "1,234.56"
        );
        assert_eq!(Clean::Amount.apply("Condition: New".to_string(), anchor), None);
    }

    #[test]
    fn test_trim_trailing_paren() {
        assert_eq!(trim_trailing_paren("Acme ("), "Acme");
        assert_eq!(trim_trailing_paren("Acme (seller profile)"), "Acme");
        assert_eq!(trim_trailing_paren("Acme (US) Inc"), "Acme (US) Inc");
        assert_eq!(trim_trailing_paren("Amazon.com Services, Inc"), "Amazon.com Services, Inc");
    }
}
