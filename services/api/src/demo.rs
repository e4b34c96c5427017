use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::Args;

use scorecard::config::AppConfig;
use scorecard::error::AppError;
use scorecard::survey::export::{export_csv, export_filename};
use scorecard::survey::report::{build_report, TabularReport};
use scorecard::survey::{
    validate_questions, SurveyBlueprint, SurveyService, SurveySnapshot, SurveySubmission,
};

use crate::infra::{parse_date, InMemorySurveyStore};

#[derive(Args, Debug)]
pub(crate) struct SurveyReportArgs {
    /// Optional snapshot JSON file with questions and recorded responses
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct SurveyExportArgs {
    /// Optional snapshot JSON file with questions and recorded responses
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Directory the artifact is written into (defaults to the working directory)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
    /// Export date embedded in the filename (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Also write the export artifact into this directory
    #[arg(long)]
    pub(crate) export_dir: Option<PathBuf>,
}

fn load_snapshot(path: Option<&Path>) -> Result<SurveySnapshot, AppError> {
    let snapshot = match path {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            serde_json::from_slice(&bytes)?
        }
        None => SurveySnapshot {
            questions: SurveyBlueprint::standard().into_questions(),
            ..SurveySnapshot::default()
        },
    };

    validate_questions(&snapshot.questions)?;
    Ok(snapshot)
}

pub(crate) fn run_survey_report(args: SurveyReportArgs) -> Result<(), AppError> {
    let snapshot = load_snapshot(args.snapshot.as_deref())?;
    let report = build_report(&snapshot.questions, &snapshot.responses);
    render_report(&report);
    Ok(())
}

pub(crate) fn run_survey_export(args: SurveyExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let snapshot = load_snapshot(args.snapshot.as_deref())?;
    let report = build_report(&snapshot.questions, &snapshot.responses);

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let filename = export_filename(&config.report.report_name, date);
    let bytes = export_csv(&report)?;

    let target = args
        .out
        .unwrap_or_else(|| PathBuf::from("."))
        .join(&filename);
    std::fs::write(&target, bytes)?;

    println!("Export written to {}", target.display());
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemorySurveyStore::with_standard_questions());
    let service = SurveyService::new(store);

    service.merge_personnel(vec![
        "Jordan Reyes".to_string(),
        "Casey Lin".to_string(),
        "Avery Shah".to_string(),
    ])?;

    for (name, scores) in sample_submissions() {
        service.submit(SurveySubmission {
            personnel_name: name.to_string(),
            scores: scores
                .iter()
                .map(|(section_id, rating)| (section_id.to_string(), *rating))
                .collect(),
        })?;
    }

    let report = service.report()?;

    println!("Survey scoring demo");
    println!("Recorded {} responses\n", report.rows.len());
    render_report(&report);

    if let Some(export_dir) = args.export_dir {
        let config = AppConfig::load()?;
        let date = Local::now().date_naive();
        let export = service.export(&config.report.report_name, date)?;
        let target = export_dir.join(&export.filename);
        std::fs::write(&target, export.bytes)?;
        println!("\nExport written to {}", target.display());
    }

    Ok(())
}

fn sample_submissions() -> Vec<(&'static str, Vec<(&'static str, f64)>)> {
    vec![
        (
            "Jordan Reyes",
            vec![
                ("Q1S1", 4.0),
                ("Q1S2", 3.0),
                ("Q2S1", 2.0),
                ("Q3S3", 5.0),
            ],
        ),
        (
            "Casey Lin",
            vec![("Q1S1", 2.0), ("Q2S2", 4.0), ("Q4S1", 3.0)],
        ),
        ("Avery Shah", vec![("Q3S1", 1.0), ("Q4S2", 5.0)]),
    ]
}

fn render_report(report: &TabularReport) {
    println!("{}", report.headers().join(" | "));

    if report.rows.is_empty() {
        println!("(no responses recorded)");
        return;
    }

    for row in &report.rows {
        let cells: Vec<String> = row.cells.iter().map(|cell| cell.render()).collect();
        println!("{}", cells.join(" | "));
    }
}
