use super::domain::{Question, Section};

/// Standard workload-intensity questionnaire shipped with the service.
///
/// Deployments replace it through the question management endpoint; the
/// blueprint exists so a fresh install renders a usable survey and so demos
/// and tests have a realistic schema.
#[derive(Debug)]
pub struct SurveyBlueprint {
    questions: Vec<Question>,
}

impl SurveyBlueprint {
    pub fn standard() -> Self {
        Self {
            questions: standard_questions(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

fn standard_questions() -> Vec<Question> {
    vec![
        question(
            "Q1",
            "Task volume handled during the shift",
            &[
                ("Q1S1", "A", "Routine task load", 2),
                ("Q1S2", "B", "Unplanned task load", 3),
                ("Q1S3", "C", "Peak-hour surge handling", 5),
            ],
        ),
        question(
            "Q2",
            "Time pressure and deadline exposure",
            &[
                ("Q2S1", "A", "Schedule adherence", 2),
                ("Q2S2", "B", "Overtime frequency", 4),
            ],
        ),
        question(
            "Q3",
            "Coordination and communication demand",
            &[
                ("Q3S1", "A", "Internal hand-offs", 1),
                ("Q3S2", "B", "Cross-team escalations", 3),
                ("Q3S3", "C", "Customer-facing load", 4),
            ],
        ),
        question(
            "Q4",
            "Physical and cognitive strain",
            &[
                ("Q4S1", "A", "Sustained concentration", 3),
                ("Q4S2", "B", "Fatigue at shift end", 2),
            ],
        ),
    ]
}

fn question(id: &str, text: &str, sections: &[(&str, &str, &str, i32)]) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        sections: sections
            .iter()
            .map(|(section_id, label, title, weight)| Section {
                id: section_id.to_string(),
                label: label.to_string(),
                title: title.to_string(),
                weight: *weight,
            })
            .collect(),
    }
}
