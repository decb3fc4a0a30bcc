//! Invoice computation
//!
//! An invoice covers every repair recorded against one device. Costs are
//! summed in the order the database returns them, a flat 7% tax is added,
//! and nothing is rounded.

use crate::{Error, Result};
use crate::storage::{InvoiceLine, RepairStore};
use serde::Serialize;

/// Flat sales tax applied to every invoice
pub const TAX_RATE: f64 = 0.07;

/// Aggregate figures of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub total: f64,
    pub tax: f64,
    pub grand_total: f64,
}

impl InvoiceTotals {
    /// Sum `lines` in order, counting a missing cost as zero
    pub fn from_lines(lines: &[InvoiceLine]) -> Self {
        let total = lines
            .iter()
            .fold(0.0, |acc, line| acc + line.cost.unwrap_or(0.0));
        let tax = total * TAX_RATE;
        Self {
            total,
            tax,
            grand_total: total + tax,
        }
    }
}

/// All repairs billed for one device, plus the computed totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub serial: String,
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
}

impl Invoice {
    /// Build an invoice from already-loaded lines.
    /// Returns `None` when there is nothing to bill.
    pub fn from_lines(serial: impl Into<String>, lines: Vec<InvoiceLine>) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        let totals = InvoiceTotals::from_lines(&lines);
        Some(Self {
            serial: serial.into(),
            lines,
            totals,
        })
    }
}

/// Load and total the repairs of the device with `serial`
pub fn generate_invoice(store: &RepairStore, serial: &str) -> Result<Invoice> {
    let lines = store.invoice_lines(serial)?;
    Invoice::from_lines(serial, lines).ok_or_else(|| Error::NotFound("No repair jobs found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(repair_id: i64, cost: Option<f64>) -> InvoiceLine {
        InvoiceLine {
            repair_id,
            cost,
            status: Some("Pending".to_string()),
        }
    }

    #[test]
    fn test_totals_with_tax() {
        let totals = InvoiceTotals::from_lines(&[line(1, Some(100.0)), line(2, Some(50.0))]);

        assert_eq!(totals.total, 150.0);
        assert!((totals.tax - 10.5).abs() < 1e-9);
        assert!((totals.grand_total - 160.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_cost_counts_as_zero() {
        let totals = InvoiceTotals::from_lines(&[line(1, None), line(2, Some(20.0))]);
        assert_eq!(totals.total, 20.0);
    }

    #[test]
    fn test_summation_follows_row_order() {
        let lines = [line(1, Some(0.1)), line(2, Some(0.2)), line(3, Some(0.3))];
        let expected = ((0.0 + 0.1) + 0.2) + 0.3;
        assert_eq!(InvoiceTotals::from_lines(&lines).total, expected);
    }

    #[test]
    fn test_empty_lines_have_no_invoice() {
        assert!(Invoice::from_lines("SN-1", Vec::new()).is_none());
    }

    #[test]
    fn test_generate_invoice() {
        let store = RepairStore::open_in_memory().unwrap();
        let customer = store.save_customer("Ada", "ada@example.com").unwrap();
        let device = store.save_device(customer, "Pixel 7", "SN-7").unwrap();
        store.save_repair(device, "Bob", "Battery", "Pending", 100.0).unwrap();
        store.save_repair(device, "Bob", "Screen", "Done", 50.0).unwrap();

        let invoice = generate_invoice(&store, "SN-7").unwrap();

        assert_eq!(invoice.serial, "SN-7");
        assert_eq!(invoice.lines.len(), 2);
        assert_eq!(invoice.totals.total, 150.0);
        assert!((invoice.totals.grand_total - 160.5).abs() < 1e-9);
    }

    #[test]
    fn test_generate_invoice_without_repairs() {
        let store = RepairStore::open_in_memory().unwrap();
        let customer = store.save_customer("Ada", "ada@example.com").unwrap();
        store.save_device(customer, "Pixel 7", "SN-7").unwrap();

        let err = generate_invoice(&store, "SN-7").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(matches!(generate_invoice(&store, "unknown"), Err(Error::NotFound(_))));
    }
}
