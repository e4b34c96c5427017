use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;

use scorecard::survey::{
    Question, StoreError, SurveyBlueprint, SurveyResponse, SurveySnapshot, SurveyStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory snapshot store. Readers clone the current snapshot; writers
/// swap in replacements whole, so a report call never observes a partially
/// updated question set.
#[derive(Default)]
pub(crate) struct InMemorySurveyStore {
    snapshot: Mutex<SurveySnapshot>,
}

impl InMemorySurveyStore {
    pub(crate) fn with_standard_questions() -> Self {
        let store = Self::default();
        {
            let mut guard = store.snapshot.lock().expect("store mutex poisoned");
            guard.questions = SurveyBlueprint::standard().into_questions();
        }
        store
    }

    pub(crate) fn from_snapshot(snapshot: SurveySnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }
}

impl SurveyStore for InMemorySurveyStore {
    fn snapshot(&self) -> Result<SurveySnapshot, StoreError> {
        Ok(self.snapshot.lock().expect("store mutex poisoned").clone())
    }

    fn append_response(&self, response: SurveyResponse) -> Result<SurveyResponse, StoreError> {
        let mut guard = self.snapshot.lock().expect("store mutex poisoned");
        guard.responses.push(response.clone());
        Ok(response)
    }

    fn replace_questions(&self, questions: Vec<Question>) -> Result<(), StoreError> {
        let mut guard = self.snapshot.lock().expect("store mutex poisoned");
        guard.questions = questions;
        Ok(())
    }

    fn merge_personnel(&self, names: Vec<String>) -> Result<usize, StoreError> {
        let mut guard = self.snapshot.lock().expect("store mutex poisoned");
        Ok(guard.personnel.merge(names))
    }

    fn remove_personnel(&self, name: &str) -> Result<(), StoreError> {
        let mut guard = self.snapshot.lock().expect("store mutex poisoned");
        if guard.personnel.remove(name) {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_seeds_standard_questions() {
        let store = InMemorySurveyStore::with_standard_questions();
        let snapshot = store.snapshot().expect("snapshot reads");

        assert!(!snapshot.questions.is_empty());
        assert!(snapshot.responses.is_empty());
    }

    #[test]
    fn removing_missing_personnel_reports_not_found() {
        let store = InMemorySurveyStore::with_standard_questions();

        assert!(matches!(
            store.remove_personnel("Nobody"),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn parse_date_accepts_iso_and_rejects_garbage() {
        assert_eq!(
            parse_date(" 2025-11-03 "),
            Ok(NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date"))
        );
        assert!(parse_date("11/03/2025").is_err());
    }
}
