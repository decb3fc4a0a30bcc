//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, ErrorCode, params, OptionalExtension};
use serde::Serialize;
use crate::{Result, Error};
use super::schema;

/// SQLite-backed storage for customers, devices and repairs.
///
/// Owns the only connection the process uses. Construct it once at
/// startup and hand it to every operation by reference.
pub struct RepairStore {
    conn: Connection,
}

impl RepairStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::debug!("Opened repair database at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(schema::PRAGMAS)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Customer Operations ==========

    /// Insert a customer, returning its new id
    pub fn save_customer(&self, name: &str, email: &str) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO customers (name, email) VALUES (?1, ?2)",
                params![name, email],
            )
            .map_err(|e| constraint_error(e, || format!("Email already registered: {}", email), String::new))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Exact-match lookup of a customer id by email
    pub fn find_customer_by_email(&self, email: &str) -> Result<Option<i64>> {
        self.conn
            .query_row("SELECT id FROM customers WHERE email = ?1", [email], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    /// Count all customers
    pub fn count_customers(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Device Operations ==========

    /// Insert a device owned by `customer_id`, returning its new id
    pub fn save_device(&self, customer_id: i64, model: &str, serial: &str) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO devices (customer_id, model, serial) VALUES (?1, ?2, ?3)",
                params![customer_id, model, serial],
            )
            .map_err(|e| {
                constraint_error(
                    e,
                    || format!("Serial already registered: {}", serial),
                    || format!("Customer {} does not exist", customer_id),
                )
            })?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Exact-match lookup of a device id by serial number
    pub fn find_device_by_serial(&self, serial: &str) -> Result<Option<i64>> {
        self.conn
            .query_row("SELECT id FROM devices WHERE serial = ?1", [serial], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    /// Count all devices
    pub fn count_devices(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM devices", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Repair Operations ==========

    /// Insert a repair job against `device_id`, returning its new id
    pub fn save_repair(
        &self,
        device_id: i64,
        technician: &str,
        issue: &str,
        status: &str,
        cost: f64,
    ) -> Result<i64> {
        self.conn
            .execute(
                r#"
                INSERT INTO repairs (device_id, technician, issue, status, cost)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![device_id, technician, issue, status, cost],
            )
            .map_err(|e| constraint_error(e, String::new, || format!("Device {} does not exist", device_id)))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All repairs joined with their device, in join order
    pub fn repair_rows(&self) -> Result<Vec<RepairRow>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT r.id, d.model, r.issue, r.status, r.technician
            FROM repairs r JOIN devices d ON r.device_id = d.id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RepairRow {
                    id: row.get(0)?,
                    model: row.get(1)?,
                    issue: row.get(2)?,
                    status: row.get(3)?,
                    technician: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Billable lines for the device with `serial`, in join order
    pub fn invoice_lines(&self, serial: &str) -> Result<Vec<InvoiceLine>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT r.id, r.cost, r.status
            FROM repairs r JOIN devices d ON r.device_id = d.id
            WHERE d.serial = ?1
            "#,
        )?;

        let lines = stmt
            .query_map([serial], |row| {
                Ok(InvoiceLine {
                    repair_id: row.get(0)?,
                    cost: row.get(1)?,
                    status: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(lines)
    }

    /// Count all repairs
    pub fn count_repairs(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM repairs", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            customers: self.count_customers()?,
            devices: self.count_devices()?,
            repairs: self.count_repairs()?,
        })
    }
}

/// Translate constraint failures into domain errors.
///
/// UNIQUE violations become [`Error::Uniqueness`], FOREIGN KEY violations
/// become [`Error::NotFound`]; anything else stays a storage error.
fn constraint_error(
    err: rusqlite::Error,
    unique_msg: impl FnOnce() -> String,
    foreign_key_msg: impl FnOnce() -> String,
) -> Error {
    let extended_code = match err.sqlite_error() {
        Some(failure) if failure.code == ErrorCode::ConstraintViolation => failure.extended_code,
        _ => return Error::Storage(err),
    };

    match extended_code {
        rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            Error::Uniqueness(unique_msg())
        }
        rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Error::NotFound(foreign_key_msg()),
        _ => Error::Storage(err),
    }
}

/// A repair joined with the model of the device it belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairRow {
    pub id: i64,
    pub model: Option<String>,
    pub issue: Option<String>,
    pub status: Option<String>,
    pub technician: Option<String>,
}

/// One billable repair on an invoice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    pub repair_id: i64,
    /// NULL in the database is carried through as `None`
    pub cost: Option<f64>,
    pub status: Option<String>,
}

/// Database statistics
#[derive(Debug, Clone, Serialize)]
pub struct DbStats {
    pub customers: usize,
    pub devices: usize,
    pub repairs: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Customers: {}", self.customers)?;
        writeln!(f, "  Devices: {}", self.devices)?;
        writeln!(f, "  Repairs: {}", self.repairs)
    }
}
