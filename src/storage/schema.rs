//! Database schema definitions

/// SQL to create the customers table
pub const CREATE_CUSTOMERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL
)
"#;

/// SQL to create the devices table
pub const CREATE_DEVICES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS devices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id INTEGER NOT NULL,
    model TEXT,
    serial TEXT UNIQUE NOT NULL,
    FOREIGN KEY(customer_id) REFERENCES customers(id)
)
"#;

/// SQL to create the repairs table
/// `status` and `cost` stay nullable so rows written by older tools still load
pub const CREATE_REPAIRS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS repairs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    device_id INTEGER NOT NULL,
    technician TEXT,
    issue TEXT,
    status TEXT,
    cost REAL,
    FOREIGN KEY(device_id) REFERENCES devices(id)
)
"#;

/// Connection-level settings applied before any table is touched
pub const PRAGMAS: &str = "PRAGMA foreign_keys = ON";

/// All schema creation statements, in dependency order
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_CUSTOMERS_TABLE,
        CREATE_DEVICES_TABLE,
        CREATE_REPAIRS_TABLE,
    ]
}
