use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::domain::{Question, Section};
use super::export::DEFAULT_REPORT_NAME;
use super::report::Cell;
use super::service::{SurveyService, SurveyServiceError, SurveySubmission};
use super::store::{StoreError, SurveyStore};

/// Router builder exposing the survey intake, reporting, and administration
/// endpoints.
pub fn survey_router<S>(service: Arc<SurveyService<S>>) -> Router
where
    S: SurveyStore + 'static,
{
    Router::new()
        .route("/api/v1/survey/responses", post(submit_handler::<S>))
        .route("/api/v1/survey/report", get(report_handler::<S>))
        .route("/api/v1/survey/report/export", get(export_handler::<S>))
        .route(
            "/api/v1/survey/questions",
            get(questions_handler::<S>).put(replace_questions_handler::<S>),
        )
        .route(
            "/api/v1/survey/sections/:section_id/weight",
            put(reweight_handler::<S>),
        )
        .route(
            "/api/v1/survey/personnel",
            get(personnel_handler::<S>).post(merge_personnel_handler::<S>),
        )
        .route(
            "/api/v1/survey/personnel/:name",
            axum::routing::delete(remove_personnel_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
struct ReportView {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    response_count: usize,
}

/// Question as shown on the admin screen, with the summed section weight
/// badge next to the text.
#[derive(Debug, Serialize)]
struct QuestionView {
    id: String,
    text: String,
    weight_total: i32,
    sections: Vec<Section>,
}

impl From<Question> for QuestionView {
    fn from(question: Question) -> Self {
        let weight_total = question.weight_total();
        Self {
            id: question.id,
            text: question.text,
            weight_total,
            sections: question.sections,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PersonnelMergeRequest {
    names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ReweightRequest {
    weight: i32,
}

async fn submit_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    Json(submission): Json<SurveySubmission>,
) -> Response
where
    S: SurveyStore + 'static,
{
    match service.submit(submission) {
        Ok(response) => {
            info!(response_id = %response.id, total = response.total_score, "survey response recorded");
            (StatusCode::ACCEPTED, Json(response)).into_response()
        }
        Err(error) => error_response(error),
    }
}

async fn report_handler<S>(State(service): State<Arc<SurveyService<S>>>) -> Response
where
    S: SurveyStore + 'static,
{
    match service.report() {
        Ok(report) => {
            let view = ReportView {
                headers: report.headers(),
                response_count: report.rows.len(),
                rows: report.rows.into_iter().map(|row| row.cells).collect(),
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

async fn export_handler<S>(State(service): State<Arc<SurveyService<S>>>) -> Response
where
    S: SurveyStore + 'static,
{
    let today = Local::now().date_naive();
    match service.export(DEFAULT_REPORT_NAME, today) {
        Ok(export) => {
            let disposition = format!("attachment; filename=\"{}\"", export.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.bytes,
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}

async fn questions_handler<S>(State(service): State<Arc<SurveyService<S>>>) -> Response
where
    S: SurveyStore + 'static,
{
    match service.snapshot() {
        Ok(snapshot) => {
            let views: Vec<QuestionView> = snapshot
                .questions
                .into_iter()
                .map(QuestionView::from)
                .collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

async fn replace_questions_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    Json(questions): Json<Vec<Question>>,
) -> Response
where
    S: SurveyStore + 'static,
{
    match service.replace_questions(questions) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

async fn reweight_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    Path(section_id): Path<String>,
    Json(request): Json<ReweightRequest>,
) -> Response
where
    S: SurveyStore + 'static,
{
    match service.set_section_weight(&section_id, request.weight) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

async fn personnel_handler<S>(State(service): State<Arc<SurveyService<S>>>) -> Response
where
    S: SurveyStore + 'static,
{
    match service.snapshot() {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot.personnel)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn merge_personnel_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    Json(request): Json<PersonnelMergeRequest>,
) -> Response
where
    S: SurveyStore + 'static,
{
    match service.merge_personnel(request.names) {
        Ok(added) => (StatusCode::OK, Json(json!({ "added": added }))).into_response(),
        Err(error) => error_response(error),
    }
}

async fn remove_personnel_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    Path(name): Path<String>,
) -> Response
where
    S: SurveyStore + 'static,
{
    match service.remove_personnel(&name) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: SurveyServiceError) -> Response {
    let status = match &error {
        SurveyServiceError::Schema(_) | SurveyServiceError::UnknownSection { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SurveyServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        SurveyServiceError::Store(_) | SurveyServiceError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::survey::domain::{SurveyResponse, SurveySnapshot};
    use crate::survey::SurveyBlueprint;

    use super::*;

    #[derive(Default)]
    struct TestStore {
        snapshot: Mutex<SurveySnapshot>,
    }

    impl TestStore {
        fn seeded() -> Self {
            let store = Self::default();
            {
                let mut guard = store.snapshot.lock().expect("store mutex poisoned");
                guard.questions = SurveyBlueprint::standard().into_questions();
            }
            store
        }
    }

    impl SurveyStore for TestStore {
        fn snapshot(&self) -> Result<SurveySnapshot, StoreError> {
            Ok(self.snapshot.lock().expect("store mutex poisoned").clone())
        }

        fn append_response(
            &self,
            response: SurveyResponse,
        ) -> Result<SurveyResponse, StoreError> {
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

    fn router() -> Router {
        let service = Arc::new(SurveyService::new(Arc::new(TestStore::seeded())));
        survey_router(service)
    }

    #[tokio::test]
    async fn submit_then_report_round_trip() {
        let app = router();

        let submit = Request::builder()
            .method("POST")
            .uri("/api/v1/survey/responses")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"personnel_name":"Jordan Reyes","scores":{"Q1S1":4.0,"Q1S2":1.0}}"#,
            ))
            .expect("request builds");
        let response = app.clone().oneshot(submit).await.expect("submit routes");
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let report = Request::builder()
            .uri("/api/v1/survey/report")
            .body(Body::empty())
            .expect("request builds");
        let response = app.oneshot(report).await.expect("report routes");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let view: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");
        assert_eq!(view["response_count"], 1);
        assert_eq!(view["headers"][0], "DATE");
        // Q1S1 rated 4 with weight 2, Q1S2 rated 1 with weight 3.
        assert_eq!(view["rows"][0][2], 8.0);
        assert_eq!(view["rows"][0][3], 3.0);
    }

    #[tokio::test]
    async fn export_sets_download_headers() {
        let app = router();

        let request = Request::builder()
            .uri("/api/v1/survey/report/export")
            .body(Body::empty())
            .expect("request builds");
        let response = app.oneshot(request).await.expect("export routes");

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content type set");
        assert_eq!(content_type, "text/csv; charset=utf-8");

        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .expect("disposition set")
            .to_str()
            .expect("ascii header");
        assert!(disposition.starts_with("attachment; filename=\"workload_analysis_report_"));
        assert!(disposition.ends_with(".csv\""));
    }

    #[tokio::test]
    async fn questions_view_carries_weight_total_badges() {
        let app = router();

        let request = Request::builder()
            .uri("/api/v1/survey/questions")
            .body(Body::empty())
            .expect("request builds");
        let response = app.oneshot(request).await.expect("route resolves");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");

        // Q1 in the standard blueprint weighs 2 + 3 + 5.
        assert_eq!(payload[0]["id"], "Q1");
        assert_eq!(payload[0]["weight_total"], 10);
        assert_eq!(payload[0]["sections"].as_array().expect("sections").len(), 3);
    }

    #[test]
    fn store_outage_maps_to_internal_error() {
        let response = error_response(SurveyServiceError::Store(StoreError::Unavailable(
            "backend offline".to_string(),
        )));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn replacing_questions_with_duplicate_section_ids_is_rejected() {
        let app = router();

        let body = r#"[
            {"id":"Q1","text":"one","sections":[{"id":"S1","label":"A","title":"","weight":1}]},
            {"id":"Q2","text":"two","sections":[{"id":"S1","label":"A","title":"","weight":1}]}
        ]"#;
        let request = Request::builder()
            .method("PUT")
            .uri("/api/v1/survey/questions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request builds");
        let response = app.oneshot(request).await.expect("route resolves");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn reweighting_unknown_section_is_unprocessable() {
        let app = router();

        let request = Request::builder()
            .method("PUT")
            .uri("/api/v1/survey/sections/nope/weight")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"weight":5}"#))
            .expect("request builds");
        let response = app.oneshot(request).await.expect("route resolves");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn personnel_merge_reports_added_count() {
        let app = router();

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/survey/personnel")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"names":["Jordan Reyes","Jordan Reyes","Casey Lin"]}"#,
            ))
            .expect("request builds");
        let response = app.oneshot(request).await.expect("route resolves");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");
        assert_eq!(payload["added"], 2);
    }

    #[tokio::test]
    async fn removing_unknown_personnel_is_not_found() {
        let app = router();

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/v1/survey/personnel/Nobody")
            .body(Body::empty())
            .expect("request builds");
        let response = app.oneshot(request).await.expect("route resolves");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
