use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    TrueFalse,
    MultipleChoice,
}

impl TryFrom<String> for QuestionType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "true-false" => Ok(Self::TrueFalse),
            "multiple-choice" => Ok(Self::MultipleChoice),
            other => Err(format!("unknown question type `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: Uuid,
    pub section_id: Uuid,
    pub question_key: String,
    #[sqlx(try_from = "String")]
    pub question_type: QuestionType,
    pub question_text: String,
    /// choice key -> label
    #[schema(value_type = Object)]
    pub options: Json<BTreeMap<String, String>>,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub order_index: i32,
}

impl ResourceTyped for QuizQuestion {
    fn get_resource_type() -> ResourceType {
        ResourceType::QuizQuestion
    }
}

impl QuizQuestion {
    /// Exact comparison, no trimming or case folding.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}

impl QuizQuestion {
    pub async fn all_by_section(mm: &ModelManager, section_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            r#"
            SELECT id, section_id, question_key, question_type, question_text,
                   options, correct_answer, explanation, order_index
            FROM quiz_questions
            WHERE section_id = $1 AND is_published = TRUE
            ORDER BY order_index ASC
            "#,
        )
        .bind(section_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }
}
