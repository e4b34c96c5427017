use chrono::NaiveDate;

use super::report::TabularReport;

/// Default artifact base name, matching the report the admin screen offers
/// for download.
pub const DEFAULT_REPORT_NAME: &str = "workload_analysis_report";

/// Byte-order mark prepended so spreadsheet applications pick up UTF-8.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Finished export artifact: suggested filename plus the byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Failure to produce the export byte stream. Surfaced to the caller; the
/// in-memory model is untouched either way.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize report row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export buffer: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize the report exactly as built: header record from the column
/// schema, one record per row, cell values through the shared renderer. No
/// reordering, no rounding.
pub fn export_csv(report: &TabularReport) -> Result<Vec<u8>, ExportError> {
    let mut bytes = UTF8_BOM.to_vec();

    {
        let mut writer = csv::Writer::from_writer(&mut bytes);

        writer.write_record(report.headers())?;
        for row in &report.rows {
            writer.write_record(row.cells.iter().map(|cell| cell.render()))?;
        }

        writer.flush()?;
    }

    Ok(bytes)
}

/// Suggested filename with the export date in a fixed, locale-stable format
/// so artifacts sort and reproduce cleanly.
pub fn export_filename(report_name: &str, date: NaiveDate) -> String {
    format!("{report_name}_{}.csv", date.format("%Y-%m-%d"))
}
