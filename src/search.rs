//! Repair search
//!
//! Every repair is reduced to a search key of `"{model} {status}"` and the
//! user's pattern is applied to that key as a case-insensitive regular
//! expression. The scan is linear over all joined rows.

use crate::Result;
use crate::storage::{RepairRow, RepairStore};
use regex::{Regex, RegexBuilder};

/// Text a search pattern is matched against. Missing values render empty.
pub fn build_search_key(model: Option<&str>, status: Option<&str>) -> String {
    format!("{} {}", model.unwrap_or_default(), status.unwrap_or_default())
}

/// A compiled, case-insensitive search pattern
#[derive(Debug, Clone)]
pub struct SearchPattern {
    regex: Regex,
}

impl SearchPattern {
    /// Compile `pattern`; a malformed expression yields `Error::Pattern`
    pub fn compile(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    /// True if the pattern occurs anywhere in `key`
    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    pub fn matches_row(&self, row: &RepairRow) -> bool {
        self.is_match(&build_search_key(row.model.as_deref(), row.status.as_deref()))
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Repairs whose model or status matches `pattern`, in join order
pub fn search_repairs(store: &RepairStore, pattern: &str) -> Result<Vec<RepairRow>> {
    let pattern = SearchPattern::compile(pattern)?;
    let rows = store.repair_rows()?;
    let scanned = rows.len();

    let matched: Vec<RepairRow> = rows.into_iter().filter(|row| pattern.matches_row(row)).collect();

    tracing::debug!(
        "Search '{}' matched {} of {} repairs",
        pattern.as_str(),
        matched.len(),
        scanned
    );
    Ok(matched)
}
