use crate::storage::{InvoiceLine, RepairRow};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

#[derive(Tabled)]
struct SearchRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Issue")]
    issue: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Technician")]
    technician: String,
}

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "RepairID")]
    repair_id: i64,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Render search hits, one line per repair
pub fn search_table(rows: &[RepairRow]) -> String {
    let rows: Vec<SearchRow> = rows
        .iter()
        .map(|row| SearchRow {
            id: row.id,
            model: row.model.clone().unwrap_or_default(),
            issue: row.issue.clone().unwrap_or_default(),
            status: row.status.clone().unwrap_or_default(),
            technician: row.technician.clone().unwrap_or_default(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render the billed lines of an invoice
pub fn invoice_table(lines: &[InvoiceLine]) -> String {
    let rows: Vec<InvoiceRow> = lines
        .iter()
        .map(|line| InvoiceRow {
            repair_id: line.repair_id,
            cost: line.cost.map(|c| format!("{:.2}", c)).unwrap_or_default(),
            status: line.status.clone().unwrap_or_default(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
