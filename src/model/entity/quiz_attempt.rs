use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::access::HasOwner;
use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_question_id: Uuid,
    pub user_answer: String,
    pub is_correct: bool,
    pub time_spent_seconds: i32,
    pub attempted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct QuizAttemptCreate {
    pub user_id: Uuid,
    pub quiz_question_id: Uuid,
    pub user_answer: String,
    pub is_correct: bool,
    pub time_spent_seconds: i32,
}

/// Optional equality filters for listing attempts.
#[derive(Debug, Clone, Default)]
pub struct QuizAttemptFilter {
    pub user_id: Option<Uuid>,
    pub quiz_question_id: Option<Uuid>,
}

impl ResourceTyped for QuizAttempt {
    fn get_resource_type() -> ResourceType {
        ResourceType::QuizAttempt
    }
}

impl HasOwner for QuizAttemptCreate {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl QuizAttemptFilter {
    pub fn matches(&self, attempt: &QuizAttempt) -> bool {
        self.user_id.is_none_or(|id| attempt.user_id == id)
            && self
                .quiz_question_id
                .is_none_or(|id| attempt.quiz_question_id == id)
    }
}

impl QuizAttempt {
    pub fn from_create(id: Uuid, data: QuizAttemptCreate) -> Self {
        Self {
            id,
            user_id: data.user_id,
            quiz_question_id: data.quiz_question_id,
            user_answer: data.user_answer,
            is_correct: data.is_correct,
            time_spent_seconds: data.time_spent_seconds,
            attempted_at: Utc::now(),
        }
    }

    pub async fn create(mm: &ModelManager, data: QuizAttemptCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO quiz_attempts (id, user_id, quiz_question_id, user_answer, is_correct, time_spent_seconds, attempted_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            RETURNING id, user_id, quiz_question_id, user_answer, is_correct, time_spent_seconds, attempted_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(data.quiz_question_id)
        .bind(&data.user_answer)
        .bind(data.is_correct)
        .bind(data.time_spent_seconds)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn list(mm: &ModelManager, filter: &QuizAttemptFilter) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            r#"
            SELECT * FROM quiz_attempts
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::uuid IS NULL OR quiz_question_id = $2)
            ORDER BY attempted_at DESC
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.quiz_question_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    pub async fn count_by_user(mm: &ModelManager, user_id: Uuid) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_attempts WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn count_correct_by_user(mm: &ModelManager, user_id: Uuid) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM quiz_attempts WHERE user_id = $1 AND is_correct = TRUE",
        )
        .bind(user_id)
        .fetch_one(mm.executor())
        .await?;
        Ok(result)
    }
}
