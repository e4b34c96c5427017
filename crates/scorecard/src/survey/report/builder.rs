use serde::Serialize;

use crate::survey::domain::{Question, SurveyResponse};
use crate::survey::scoring::{compute_total, weighted_cell_value};

use super::columns::{derive_columns, ReportColumn};

/// Fixed, locale-independent timestamp rendering shared by every output
/// medium.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One report cell. Rendering goes through [`Cell::render`] everywhere so
/// the live table, the JSON view, and the exported file agree on each value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => format_number(*value),
        }
    }
}

/// Integral values render without a decimal point so whole scores read as
/// whole numbers in spreadsheet applications.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub cells: Vec<Cell>,
}

/// Column schema plus projected rows, ready for any rendering path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularReport {
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<ReportRow>,
}

impl TabularReport {
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(ReportColumn::header).collect()
    }
}

/// Project the snapshot into the canonical tabular report.
///
/// Rows follow response input order with no re-sorting. The trailing total
/// is recomputed from current weights on every call; the stored
/// `total_score` never reaches the output. Zero responses still yields the
/// full column schema so callers can render a placeholder row.
pub fn build_report(questions: &[Question], responses: &[SurveyResponse]) -> TabularReport {
    let columns = derive_columns(questions);

    let rows = responses
        .iter()
        .map(|response| build_row(questions, response, &columns))
        .collect();

    TabularReport { columns, rows }
}

fn build_row(
    questions: &[Question],
    response: &SurveyResponse,
    columns: &[ReportColumn],
) -> ReportRow {
    let cells = columns
        .iter()
        .map(|column| match column {
            ReportColumn::Timestamp => Cell::Text(
                response
                    .submitted_at
                    .format(TIMESTAMP_FORMAT)
                    .to_string(),
            ),
            ReportColumn::Personnel => Cell::Text(response.personnel_name.clone()),
            ReportColumn::Section(section_column) => {
                let section = questions
                    .iter()
                    .flat_map(|question| &question.sections)
                    .find(|section| section.id == section_column.section_id);

                match section {
                    Some(section) => Cell::Number(weighted_cell_value(response, section)),
                    // Unreachable when columns came from the same questions,
                    // but a stale schema must not panic the builder.
                    None => Cell::Number(0.0),
                }
            }
            ReportColumn::Total => Cell::Number(compute_total(response, questions)),
        })
        .collect();

    ReportRow { cells }
}
