//! CSV file output
//!
//! Records are written with RFC 4180 quoting and CRLF line endings.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Write a header row and records to `path`, replacing any existing file
pub fn write_csv(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    write_record(&mut out, headers.iter().copied())?;
    for row in rows {
        write_record(&mut out, row.iter().map(String::as_str))?;
    }
    out.flush()?;

    log::debug!("Wrote {} CSV rows to {}", rows.len(), path.display());
    Ok(())
}

/// Confirmation line printed after a CSV export
pub fn saved_message(path: &Path) -> String {
    format!("CSV report saved as: {}", path.display())
}

fn write_record<'a, W: Write>(out: &mut W, fields: impl Iterator<Item = &'a str>) -> Result<()> {
    let line = fields.map(escape_field).collect::<Vec<_>>().join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")?;
    Ok(())
}

/// Quote a field if it contains a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
