mod builder;
mod columns;

pub use builder::{build_report, Cell, ReportRow, TabularReport, TIMESTAMP_FORMAT};
pub use columns::{derive_columns, ReportColumn, SectionColumn};
