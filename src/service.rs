//! Request boundary
//!
//! `RepairDesk` is what a front end talks to. Each method validates its
//! input, resolves references by email or serial, performs a single
//! store operation and reports the outcome as a typed [`Error`].

use crate::export;
use crate::invoice::{self, Invoice};
use crate::model::{Customer, Device, Repair};
use crate::role::Role;
use crate::search;
use crate::storage::{RepairRow, RepairStore};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Input for opening a repair job
#[derive(Debug, Clone, Default)]
pub struct NewRepair {
    pub serial: String,
    pub technician: String,
    pub issue: String,
    pub status: Option<String>,
    pub cost: Option<f64>,
}

impl NewRepair {
    pub fn new(serial: impl Into<String>, technician: impl Into<String>, issue: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            technician: technician.into(),
            issue: issue.into(),
            ..Self::default()
        }
    }
}

/// An exported invoice and where it was written
#[derive(Debug, Clone)]
pub struct InvoiceExport {
    pub invoice: Invoice,
    pub path: PathBuf,
}

pub struct RepairDesk<'a> {
    store: &'a RepairStore,
    role: Option<Role>,
}

impl<'a> RepairDesk<'a> {
    pub fn new(store: &'a RepairStore, role: Option<Role>) -> Self {
        Self { store, role }
    }

    pub fn create_customer(&self, name: &str, email: &str) -> Result<i64> {
        if name.is_empty() || email.is_empty() {
            return Err(rejected(Error::Validation("Name and Email required".to_string())));
        }

        let id = Customer::new(name, email).save(self.store).map_err(rejected)?;
        tracing::info!("Saved customer {} ({})", id, email);
        Ok(id)
    }

    pub fn create_device(&self, email: &str, model: &str, serial: &str) -> Result<i64> {
        if email.is_empty() {
            return Err(rejected(Error::Validation("Email required".to_string())));
        }
        let customer_id = self
            .store
            .find_customer_by_email(email)
            .map_err(rejected)?
            .ok_or_else(|| rejected(Error::NotFound("Customer not found".to_string())))?;
        if model.is_empty() || serial.is_empty() {
            return Err(rejected(Error::Validation("Model and Serial required".to_string())));
        }

        let id = Device::new(customer_id, model, serial).save(self.store).map_err(rejected)?;
        tracing::info!("Saved device {} ({}) for customer {}", id, serial, customer_id);
        Ok(id)
    }

    pub fn create_repair(&self, request: &NewRepair) -> Result<i64> {
        if !self.role.is_some_and(|role| role.can_create_repairs()) {
            return Err(rejected(Error::Permission("Access denied".to_string())));
        }
        let device_id = self
            .store
            .find_device_by_serial(&request.serial)
            .map_err(rejected)?
            .ok_or_else(|| rejected(Error::NotFound("Device not found".to_string())))?;
        if request.technician.is_empty() || request.issue.is_empty() {
            return Err(rejected(Error::Validation("Technician and issue required".to_string())));
        }

        let mut repair = Repair::new(device_id, request.technician.as_str(), request.issue.as_str());
        if let Some(status) = &request.status {
            repair = repair.with_status(status.as_str());
        }
        if let Some(cost) = request.cost {
            repair = repair.with_cost(cost);
        }

        let id = repair.save(self.store).map_err(rejected)?;
        tracing::info!("Saved repair {} on device {} ({})", id, request.serial, repair.status);
        Ok(id)
    }

    pub fn search_repairs(&self, pattern: &str) -> Result<Vec<RepairRow>> {
        if pattern.is_empty() {
            return Err(rejected(Error::Validation("Pattern required".to_string())));
        }
        search::search_repairs(self.store, pattern).map_err(rejected)
    }

    /// Total the repairs of a device and write the invoice into `out_dir`.
    /// Nothing is written when the device has no repairs.
    pub fn generate_invoice(&self, serial: &str, out_dir: &Path) -> Result<InvoiceExport> {
        let invoice = invoice::generate_invoice(self.store, serial).map_err(rejected)?;
        let path = export::write_invoice(&invoice, out_dir).map_err(rejected)?;
        Ok(InvoiceExport { invoice, path })
    }
}

/// Log a rejected request and pass the error through
fn rejected(err: Error) -> Error {
    tracing::warn!(kind = %err.kind(), "Request rejected: {}", err);
    err
}
