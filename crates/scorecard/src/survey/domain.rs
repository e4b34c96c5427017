use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::roster::PersonnelRoster;

/// A weighted survey question composed of individually scored sections.
///
/// Section order is rendering order: the report derives its column layout
/// from the sequence stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub sections: Vec<Section>,
}

impl Question {
    /// Sum of the section weights, shown next to the question in admin views.
    pub fn weight_total(&self) -> i32 {
        self.sections.iter().map(|section| section.weight).sum()
    }
}

/// The smallest scorable unit. Section ids are the global cell lookup key,
/// so they must be unique across the whole question set, not just within
/// their parent question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    /// Short display token ("A", "B", ...) concatenated with the parent
    /// question id to form the column header.
    pub label: String,
    pub title: String,
    /// Non-negative integer multiplier applied to the raw rating.
    pub weight: i32,
}

/// One submitted survey, immutable after submission.
///
/// `scores` is sparse: a section with no entry is treated as rated 0. The
/// `total_score` field records the total as computed at submission time;
/// renders and exports recompute from current weights instead of trusting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    pub personnel_name: String,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub total_score: f64,
}

/// Consistent, point-in-time copy of the survey data handed into the core
/// for one aggregation or export call. Edits produce a new snapshot; the
/// core never writes back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveySnapshot {
    pub questions: Vec<Question>,
    pub responses: Vec<SurveyResponse>,
    pub personnel: PersonnelRoster,
}

/// Structural defects in the question/section definitions. Detected by
/// [`validate_questions`], surfaced to the caller, never silently corrected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("question '{question_id}' has no sections")]
    EmptySections { question_id: String },
    #[error("question id '{id}' is defined more than once")]
    DuplicateQuestionId { id: String },
    #[error("section id '{id}' is defined more than once")]
    DuplicateSectionId { id: String },
    #[error("section '{section_id}' has negative weight {weight}")]
    NegativeWeight { section_id: String, weight: i32 },
}

/// Validate a question set against the schema invariants.
///
/// Advisory: the scoring engine and report builder assume this ran but do
/// not crash on unvalidated input; they only ever read what is present.
pub fn validate_questions(questions: &[Question]) -> Result<(), SchemaError> {
    let mut question_ids = HashSet::new();
    let mut section_ids = HashSet::new();

    for question in questions {
        if !question_ids.insert(question.id.as_str()) {
            return Err(SchemaError::DuplicateQuestionId {
                id: question.id.clone(),
            });
        }

        if question.sections.is_empty() {
            return Err(SchemaError::EmptySections {
                question_id: question.id.clone(),
            });
        }

        for section in &question.sections {
            if !section_ids.insert(section.id.as_str()) {
                return Err(SchemaError::DuplicateSectionId {
                    id: section.id.clone(),
                });
            }

            if section.weight < 0 {
                return Err(SchemaError::NegativeWeight {
                    section_id: section.id.clone(),
                    weight: section.weight,
                });
            }
        }
    }

    Ok(())
}
