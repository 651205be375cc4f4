use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::access::HasOwner;
use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult};

/// One row per (user, section).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub section_id: Uuid,
    pub is_completed: bool,
    pub completion_percentage: i32,
    pub time_spent_seconds: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserProgressUpsert {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub section_id: Uuid,
    pub is_completed: bool,
    pub completion_percentage: i32,
    pub time_spent_seconds: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ProgressFilter {
    pub user_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
}

impl ResourceTyped for UserProgress {
    fn get_resource_type() -> ResourceType {
        ResourceType::UserProgress
    }
}

impl HasOwner for UserProgressUpsert {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl ProgressFilter {
    pub fn matches(&self, row: &UserProgress) -> bool {
        self.user_id.is_none_or(|id| row.user_id == id)
            && self.course_id.is_none_or(|id| row.course_id == id)
            && self.section_id.is_none_or(|id| row.section_id == id)
    }
}

impl UserProgress {
    /// Applies an upsert to an existing row, or builds a fresh one.
    pub fn merge(existing: Option<Self>, data: UserProgressUpsert) -> Self {
        let id = existing.as_ref().map(|row| row.id).unwrap_or_else(Uuid::new_v4);
        Self {
            id,
            user_id: data.user_id,
            course_id: data.course_id,
            section_id: data.section_id,
            is_completed: data.is_completed,
            completion_percentage: data.completion_percentage,
            time_spent_seconds: data.time_spent_seconds,
            updated_at: Utc::now(),
        }
    }

    pub async fn upsert(mm: &ModelManager, data: UserProgressUpsert) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO user_progress
                (id, user_id, course_id, section_id, is_completed, completion_percentage, time_spent_seconds, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, now())
            ON CONFLICT (user_id, section_id) DO UPDATE SET
                course_id = EXCLUDED.course_id,
                is_completed = EXCLUDED.is_completed,
                completion_percentage = EXCLUDED.completion_percentage,
                time_spent_seconds = EXCLUDED.time_spent_seconds,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(data.course_id)
        .bind(data.section_id)
        .bind(data.is_completed)
        .bind(data.completion_percentage)
        .bind(data.time_spent_seconds)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    pub async fn list(mm: &ModelManager, filter: &ProgressFilter) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            r#"
            SELECT * FROM user_progress
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::uuid IS NULL OR course_id = $2)
              AND ($3::uuid IS NULL OR section_id = $3)
            ORDER BY updated_at ASC
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.course_id)
        .bind(filter.section_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    pub async fn count_completed(mm: &ModelManager, user_id: Uuid) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_progress WHERE user_id = $1 AND is_completed = TRUE",
        )
        .bind(user_id)
        .fetch_one(mm.executor())
        .await?;
        Ok(result)
    }
}
