//! Pure scoring functions over a survey snapshot.
//!
//! These are the single source of truth for weighted values and totals: the
//! report builder and the export path both go through here, so the on-screen
//! table and the exported file can never disagree on a number.

use tracing::debug;

use super::domain::{Question, Section, SurveyResponse};

/// Raw rating for one section, defaulting to 0 when absent.
///
/// The default lives here and nowhere else. A missing entry and an explicit
/// zero rating are indistinguishable downstream; the miss is logged at debug
/// level for observability but never aborts aggregation.
pub fn raw_rating(response: &SurveyResponse, section_id: &str) -> f64 {
    match response.scores.get(section_id) {
        Some(rating) => *rating,
        None => {
            debug!(
                response_id = %response.id,
                section_id,
                "no rating recorded for section, scoring as 0"
            );
            0.0
        }
    }
}

/// Weighted contribution of one response/section pair: raw rating times the
/// section weight. Not rounded or clamped; formatting is a rendering concern.
pub fn weighted_cell_value(response: &SurveyResponse, section: &Section) -> f64 {
    raw_rating(response, &section.id) * f64::from(section.weight)
}

/// Total score for a response under the current question definitions,
/// iterating questions and their sections in stored order.
///
/// Always recomputed from current weights; the stored `total_score` field is
/// a submission-time record and may be stale after a reweight. An empty
/// question set totals 0.
pub fn compute_total(response: &SurveyResponse, questions: &[Question]) -> f64 {
    questions
        .iter()
        .flat_map(|question| &question.sections)
        .map(|section| weighted_cell_value(response, section))
        .sum()
}
