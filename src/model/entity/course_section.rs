use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSection {
    pub id: Uuid,
    pub course_id: Uuid,
    pub section_key: String,
    pub title: String,
    pub order_index: i32,
    pub icon_name: Option<String>,
    pub is_published: bool,
}

impl ResourceTyped for CourseSection {
    fn get_resource_type() -> ResourceType {
        ResourceType::CourseSection
    }
}

impl CourseSection {
    pub async fn all_by_course(mm: &ModelManager, course_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM course_sections WHERE course_id = $1 AND is_published = TRUE ORDER BY order_index ASC",
        )
        .bind(course_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }

    pub async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM course_sections WHERE id = $1 AND is_published = TRUE")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }
}
