//! # RepairMate - Repair shop record keeping
//!
//! Tracks customers, their devices and the repair jobs opened against
//! those devices, backed by a local SQLite file.
//!
//! RepairMate provides:
//! - An append-only record store for customers, devices and repairs
//! - Exact lookups by customer email and device serial
//! - Case-insensitive pattern search over device model and repair status
//! - Invoice computation (total, 7% tax, grand total) and CSV export

pub mod model;
pub mod role;
pub mod storage;
pub mod search;
pub mod invoice;
pub mod export;
pub mod service;
pub mod output;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use model::{Customer, Device, Repair};
pub use role::Role;
pub use storage::RepairStore;
pub use invoice::{Invoice, InvoiceTotals};
pub use service::{NewRepair, RepairDesk};

/// Result type alias for RepairMate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for RepairMate operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Uniqueness(String),

    #[error("{0}")]
    Permission(String),

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`Error`], for callers that branch on the kind
/// of failure rather than its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Uniqueness,
    Permission,
    Pattern,
    Storage,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Uniqueness => "uniqueness",
            ErrorKind::Permission => "permission",
            ErrorKind::Pattern => "pattern",
            ErrorKind::Storage => "storage",
            ErrorKind::Io => "io",
        }
    }

    /// Title used when the error is shown to a person
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::Permission => "Permission Error",
            _ => "Error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Uniqueness(_) => ErrorKind::Uniqueness,
            Error::Permission(_) => ErrorKind::Permission,
            Error::Pattern(_) => ErrorKind::Pattern,
            Error::Storage(_) => ErrorKind::Storage,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}
