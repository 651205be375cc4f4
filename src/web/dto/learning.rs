use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    learning::CourseProgress,
    model::entity::{Course, QuizQuestion},
    navigation::CourseNavigation,
};

/// One section of the learning view, already rendered.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub id: Uuid,
    pub section_key: String,
    pub title: String,
    pub order_index: i32,
    pub accessible: bool,
    pub completed: bool,
    pub html: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningView {
    pub course: Course,
    pub sections: Vec<SectionView>,
    pub progress: CourseProgress,
    pub navigation: CourseNavigation,
}
