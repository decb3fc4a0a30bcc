//! Invoice export as CSV
//!
//! Layout: a `RepairID,Cost,Status` header, one row per repair, a blank
//! row, then the `Total`, `Tax (7%)` and `Grand Total` rows.

use crate::{Error, Result};
use crate::invoice::Invoice;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const LINE_END: &str = "\r\n";

/// File name an invoice for `serial` is written to
pub fn invoice_file_name(serial: &str) -> String {
    format!("invoice_{}.csv", serial)
}

/// Write `invoice` into `dir`, returning the path of the new file.
///
/// `dir` is created if missing. The file only appears once it is complete.
pub fn write_invoice(invoice: &Invoice, dir: &Path) -> Result<PathBuf> {
    if invoice.serial.contains(['/', '\\']) {
        return Err(Error::Validation(format!(
            "Serial cannot be used as a file name: {}",
            invoice.serial
        )));
    }

    fs::create_dir_all(dir)?;
    let file_name = invoice_file_name(&invoice.serial);
    let path = dir.join(&file_name);
    let partial = dir.join(format!(".{}.partial", file_name));

    if let Err(err) = write_file(invoice, &partial).and_then(|_| fs::rename(&partial, &path)) {
        // Keep the original error if cleanup fails too
        let _ = fs::remove_file(&partial);
        return Err(err.into());
    }

    tracing::info!("Wrote invoice for {} to {}", invoice.serial, path.display());
    Ok(path)
}

fn write_file(invoice: &Invoice, path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    render_invoice(invoice, &mut out)?;
    out.flush()
}

/// Render `invoice` as CSV into any writer
pub fn render_invoice<W: Write>(invoice: &Invoice, out: &mut W) -> std::io::Result<()> {
    write_row(out, &["RepairID", "Cost", "Status"])?;
    for line in &invoice.lines {
        let id = line.repair_id.to_string();
        let cost = line.cost.map(format_amount).unwrap_or_default();
        let status = line.status.as_deref().unwrap_or_default();
        write_row(out, &[id.as_str(), cost.as_str(), status])?;
    }
    write_row(out, &[])?;
    let totals = &invoice.totals;
    write_row(out, &["Total", format_amount(totals.total).as_str()])?;
    write_row(out, &["Tax (7%)", format_amount(totals.tax).as_str()])?;
    write_row(out, &["Grand Total", format_amount(totals.grand_total).as_str()])?;
    Ok(())
}

/// Shortest representation that reads back to the same value; whole
/// numbers keep a trailing `.0`. Exponents carry a sign and at least two
/// digits (`1e+16`, `1e-05`).
pub fn format_amount(value: f64) -> String {
    let text = format!("{:?}", value);
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> std::io::Result<()> {
    let row: Vec<String> = fields.iter().map(|field| escape_field(field)).collect();
    write!(out, "{}{}", row.join(","), LINE_END)
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
