use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub full_name: String,
    pub total_courses: i64,
    pub completed_sections: i64,
    pub total_answers: i64,
    pub correct_answers: i64,
    /// `correct / total * 100`, 0 without answers.
    pub accuracy: f64,
}

impl DashboardSummary {
    pub fn new(
        full_name: String,
        total_courses: i64,
        completed_sections: i64,
        total_answers: i64,
        correct_answers: i64,
    ) -> Self {
        let accuracy = if total_answers == 0 {
            0.0
        } else {
            correct_answers as f64 / total_answers as f64 * 100.0
        };

        Self {
            full_name,
            total_courses,
            completed_sections,
            total_answers,
            correct_answers,
            accuracy,
        }
    }
}
