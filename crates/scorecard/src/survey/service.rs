use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{validate_questions, Question, SchemaError, SurveyResponse, SurveySnapshot};
use super::export::{export_csv, export_filename, CsvExport, ExportError};
use super::report::{build_report, TabularReport};
use super::scoring::compute_total;
use super::store::{StoreError, SurveyStore};

/// Incoming survey submission before the service assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub personnel_name: String,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

/// Service facade composing the store seam with the pure scoring, report,
/// and export functions.
pub struct SurveyService<S> {
    store: Arc<S>,
}

static RESPONSE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_response_id() -> String {
    let id = RESPONSE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("resp-{id:06}")
}

impl<S> SurveyService<S>
where
    S: SurveyStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Record a submission, computing the stored total once against the
    /// weights in effect right now. Later reweights do not rewrite it; every
    /// render recomputes instead.
    pub fn submit(
        &self,
        submission: SurveySubmission,
    ) -> Result<SurveyResponse, SurveyServiceError> {
        let snapshot = self.store.snapshot()?;

        let mut response = SurveyResponse {
            id: next_response_id(),
            submitted_at: Utc::now(),
            personnel_name: submission.personnel_name,
            scores: submission.scores,
            total_score: 0.0,
        };
        response.total_score = compute_total(&response, &snapshot.questions);

        let stored = self.store.append_response(response)?;
        Ok(stored)
    }

    /// Current snapshot, for callers rendering their own views.
    pub fn snapshot(&self) -> Result<SurveySnapshot, SurveyServiceError> {
        Ok(self.store.snapshot()?)
    }

    /// Build the tabular report from a fresh snapshot.
    pub fn report(&self) -> Result<TabularReport, SurveyServiceError> {
        let snapshot = self.store.snapshot()?;
        Ok(build_report(&snapshot.questions, &snapshot.responses))
    }

    /// Build the report and serialize it into the downloadable artifact.
    pub fn export(
        &self,
        report_name: &str,
        date: NaiveDate,
    ) -> Result<CsvExport, SurveyServiceError> {
        let report = self.report()?;
        let bytes = export_csv(&report)?;

        Ok(CsvExport {
            filename: export_filename(report_name, date),
            bytes,
        })
    }

    /// Replace the whole question set after validating it.
    pub fn replace_questions(&self, questions: Vec<Question>) -> Result<(), SurveyServiceError> {
        validate_questions(&questions)?;
        self.store.replace_questions(questions)?;
        Ok(())
    }

    /// Reweight one section, copy-on-write: the replacement question set is
    /// validated before it reaches the store.
    pub fn set_section_weight(
        &self,
        section_id: &str,
        weight: i32,
    ) -> Result<(), SurveyServiceError> {
        let snapshot = self.store.snapshot()?;

        let mut matched = false;
        let questions: Vec<Question> = snapshot
            .questions
            .into_iter()
            .map(|mut question| {
                for section in &mut question.sections {
                    if section.id == section_id {
                        section.weight = weight;
                        matched = true;
                    }
                }
                question
            })
            .collect();

        if !matched {
            return Err(SurveyServiceError::UnknownSection {
                section_id: section_id.to_string(),
            });
        }

        validate_questions(&questions)?;
        self.store.replace_questions(questions)?;
        Ok(())
    }

    /// Bulk-add personnel names; returns how many were new.
    pub fn merge_personnel(&self, names: Vec<String>) -> Result<usize, SurveyServiceError> {
        Ok(self.store.merge_personnel(names)?)
    }

    pub fn remove_personnel(&self, name: &str) -> Result<(), SurveyServiceError> {
        Ok(self.store.remove_personnel(name)?)
    }
}

/// Error raised by the survey service.
#[derive(Debug, thiserror::Error)]
pub enum SurveyServiceError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("section '{section_id}' is not defined")]
    UnknownSection { section_id: String },
}
