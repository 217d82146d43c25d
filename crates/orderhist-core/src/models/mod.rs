//! Data models: output records and pipeline configuration.

pub mod config;
pub mod record;

pub use config::OrderhistConfig;
pub use record::{ItemField, ItemRecord, OrderField, OrderItemRecord, OrderRecord};
