pub mod domain;
pub mod export;
pub mod report;
pub mod roster;
pub mod router;
pub mod scoring;
pub mod store;

mod blueprint;
mod service;

pub use blueprint::SurveyBlueprint;
pub use domain::{
    validate_questions, Question, SchemaError, Section, SurveyResponse, SurveySnapshot,
};
pub use export::{CsvExport, ExportError};
pub use report::TabularReport;
pub use roster::PersonnelRoster;
pub use router::survey_router;
pub use service::{SurveyService, SurveyServiceError, SurveySubmission};
pub use store::{StoreError, SurveyStore};
