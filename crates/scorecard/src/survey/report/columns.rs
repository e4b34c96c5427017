use serde::Serialize;

use crate::survey::domain::Question;

/// One column of the tabular report, in render order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportColumn {
    Timestamp,
    Personnel,
    Section(SectionColumn),
    Total,
}

/// Column metadata for one section, carrying the weight annotation shown in
/// the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionColumn {
    pub question_id: String,
    pub section_id: String,
    pub label: String,
    pub weight: i32,
}

impl ReportColumn {
    pub fn header(&self) -> String {
        match self {
            Self::Timestamp => "DATE".to_string(),
            Self::Personnel => "PERSONNEL NAME".to_string(),
            Self::Section(column) => format!(
                "{}{} ({}x)",
                column.question_id, column.label, column.weight
            ),
            Self::Total => "TOTAL SCORE".to_string(),
        }
    }
}

/// Flatten the current question definitions into the canonical column order:
/// two fixed leading columns, one column per section in question order then
/// section order, and the fixed trailing total.
///
/// Derived fresh on every call so edits to questions, sections, or weights
/// show up in the next render and the next export without a separate sync
/// step.
pub fn derive_columns(questions: &[Question]) -> Vec<ReportColumn> {
    let mut columns = Vec::with_capacity(
        3 + questions
            .iter()
            .map(|question| question.sections.len())
            .sum::<usize>(),
    );

    columns.push(ReportColumn::Timestamp);
    columns.push(ReportColumn::Personnel);

    for question in questions {
        for section in &question.sections {
            columns.push(ReportColumn::Section(SectionColumn {
                question_id: question.id.clone(),
                section_id: section.id.clone(),
                label: section.label.clone(),
                weight: section.weight,
            }));
        }
    }

    columns.push(ReportColumn::Total);
    columns
}
