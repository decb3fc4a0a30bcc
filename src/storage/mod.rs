//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - customers(id, name, email)
//! - devices(id, customer_id, model, serial)
//! - repairs(id, device_id, technician, issue, status, cost)
//!
//! Rows are only ever inserted; nothing is updated or deleted.

pub mod schema;
pub mod sqlite;

pub use sqlite::{RepairStore, RepairRow, InvoiceLine, DbStats};
