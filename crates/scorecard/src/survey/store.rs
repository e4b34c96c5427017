use super::domain::{Question, SurveyResponse, SurveySnapshot};

/// Storage seam for the surrounding application state container.
///
/// Readers always receive a consistent snapshot taken at call time; writers
/// replace whole value sets (copy-on-write) rather than mutating in place,
/// so report generation never observes a partially updated question.
pub trait SurveyStore: Send + Sync {
    fn snapshot(&self) -> Result<SurveySnapshot, StoreError>;
    fn append_response(&self, response: SurveyResponse) -> Result<SurveyResponse, StoreError>;
    fn replace_questions(&self, questions: Vec<Question>) -> Result<(), StoreError>;
    fn merge_personnel(&self, names: Vec<String>) -> Result<usize, StoreError>;
    fn remove_personnel(&self, name: &str) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    /// Reserved for store implementations backed by real I/O (database or
    /// file storage); the bundled in-memory store never raises it.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
