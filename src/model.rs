//! Entity types - customers, devices and repair jobs
//!
//! Each entity is built in memory and persisted with `save`, which inserts
//! exactly one row and returns the id the database assigned. Entities are
//! never updated or deleted afterwards.

use crate::Result;
use crate::storage::RepairStore;
use serde::{Deserialize, Serialize};

/// Status given to a repair job when none is supplied
pub const DEFAULT_STATUS: &str = "Pending";

/// A shop customer, identified by a unique email address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Insert this customer. Fails with `Error::Uniqueness` if the email is taken.
    pub fn save(&self, store: &RepairStore) -> Result<i64> {
        store.save_customer(&self.name, &self.email)
    }
}

/// A device brought in by a customer, identified by a unique serial number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub customer_id: i64,
    pub model: String,
    pub serial: String,
}

impl Device {
    pub fn new(customer_id: i64, model: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            customer_id,
            model: model.into(),
            serial: serial.into(),
        }
    }

    /// Insert this device. Fails with `Error::Uniqueness` on a duplicate
    /// serial and `Error::NotFound` if the owning customer is gone.
    pub fn save(&self, store: &RepairStore) -> Result<i64> {
        store.save_device(self.customer_id, &self.model, &self.serial)
    }
}

/// A repair job opened against a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repair {
    pub device_id: i64,
    pub technician: String,
    pub issue: String,
    pub status: String,
    /// Not checked for sign; credits are stored as negative costs
    pub cost: f64,
}

impl Repair {
    /// A new job with status "Pending" and zero cost
    pub fn new(device_id: i64, technician: impl Into<String>, issue: impl Into<String>) -> Self {
        Self {
            device_id,
            technician: technician.into(),
            issue: issue.into(),
            status: DEFAULT_STATUS.to_string(),
            cost: 0.0,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn save(&self, store: &RepairStore) -> Result<i64> {
        store.save_repair(self.device_id, &self.technician, &self.issue, &self.status, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_repair_defaults() {
        let repair = Repair::new(1, "Bob", "Cracked screen");
        assert_eq!(repair.status, "Pending");
        assert_eq!(repair.cost, 0.0);

        let repair = repair.with_status("Done").with_cost(80.5);
        assert_eq!(repair.status, "Done");
        assert_eq!(repair.cost, 80.5);
    }

    #[test]
    fn test_entities_save_in_order() {
        let store = RepairStore::open_in_memory().unwrap();

        let customer_id = Customer::new("Ada", "ada@example.com").save(&store).unwrap();
        let device_id = Device::new(customer_id, "Pixel 7", "SN-7").save(&store).unwrap();
        let repair_id = Repair::new(device_id, "Bob", "Battery").save(&store).unwrap();

        assert_eq!(store.find_device_by_serial("SN-7").unwrap(), Some(device_id));
        let lines = store.invoice_lines("SN-7").unwrap();
        assert_eq!(lines[0].repair_id, repair_id);
        assert_eq!(lines[0].status.as_deref(), Some("Pending"));
        assert_eq!(lines[0].cost, Some(0.0));
    }

    #[test]
    fn test_duplicate_customer_leaves_row_count_unchanged() {
        let store = RepairStore::open_in_memory().unwrap();
        Customer::new("Ada", "ada@example.com").save(&store).unwrap();

        let err = Customer::new("Ada Two", "ada@example.com").save(&store).unwrap_err();

        assert!(matches!(err, Error::Uniqueness(_)));
        assert_eq!(store.count_customers().unwrap(), 1);
    }

    #[test]
    fn test_negative_cost_is_accepted() {
        let store = RepairStore::open_in_memory().unwrap();
        let customer_id = Customer::new("Ada", "ada@example.com").save(&store).unwrap();
        let device_id = Device::new(customer_id, "Pixel 7", "SN-7").save(&store).unwrap();

        Repair::new(device_id, "Bob", "Goodwill credit").with_cost(-25.0).save(&store).unwrap();

        assert_eq!(store.invoice_lines("SN-7").unwrap()[0].cost, Some(-25.0));
    }
}
