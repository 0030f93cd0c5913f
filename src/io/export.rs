//! Export observation tables to CSV text and XLSX workbooks.
//!
//! Both exports produce byte buffers so callers can offer them as downloads
//! or inspect them in tests without touching the filesystem. Tables are
//! date-indexed; missing values stay empty, they are never written as zero.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::domain::ObservationTable;
use crate::error::DashError;

/// Serialize a table to CSV bytes with a `date,value` header.
pub fn to_csv_bytes(table: &ObservationTable) -> Result<Vec<u8>, DashError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(["date", "value"])?;
        for obs in table.rows() {
            let value = obs.value.map(|v| v.to_string()).unwrap_or_default();
            writer.write_record([obs.date.to_string(), value])?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

/// Serialize a table to a single-sheet XLSX workbook.
///
/// Sheet names follow the Excel rules (31 chars, no `[]:*?/\`); callers pass
/// short display names like "Capacity Utilization Data".
pub fn to_xlsx_bytes(table: &ObservationTable, sheet_name: &str) -> Result<Vec<u8>, DashError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    worksheet.write_string(0, 0, "date")?;
    worksheet.write_string(0, 1, "value")?;
    for (i, obs) in table.rows().iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, obs.date.to_string())?;
        if let Some(v) = obs.value {
            worksheet.write_number(row, 1, v)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write the CSV export to a file.
pub fn write_csv(path: &Path, table: &ObservationTable) -> Result<(), DashError> {
    fs::write(path, to_csv_bytes(table)?)?;
    Ok(())
}

/// Write the XLSX export to a file.
pub fn write_xlsx(path: &Path, table: &ObservationTable, sheet_name: &str) -> Result<(), DashError> {
    fs::write(path, to_xlsx_bytes(table, sheet_name)?)?;
    Ok(())
}
