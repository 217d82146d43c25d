//! Invoice page extraction module.

pub mod document;
mod extractor;
pub mod rules;

pub use document::{InvoiceDocument, NodeId, NodeKind};
pub use extractor::{Extraction, FieldMiss, InvoiceExtractor};
