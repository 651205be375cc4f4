use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::access::HasOwner;
use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    View,
    Click,
    Expand,
    Collapse,
    Download,
    Share,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Click => "click",
            Self::Expand => "expand",
            Self::Collapse => "collapse",
            Self::Download => "download",
            Self::Share => "share",
        }
    }
}

impl TryFrom<String> for InteractionType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        serde_json::from_value(serde_json::Value::String(value))
            .map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentInteraction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_block_id: Uuid,
    #[sqlx(try_from = "String")]
    pub interaction_type: InteractionType,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ContentInteractionCreate {
    pub user_id: Uuid,
    pub content_block_id: Uuid,
    pub interaction_type: InteractionType,
    pub metadata: serde_json::Value,
}

impl ResourceTyped for ContentInteraction {
    fn get_resource_type() -> ResourceType {
        ResourceType::ContentInteraction
    }
}

impl HasOwner for ContentInteractionCreate {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl ContentInteraction {
    pub fn from_create(id: Uuid, data: ContentInteractionCreate) -> Self {
        Self {
            id,
            user_id: data.user_id,
            content_block_id: data.content_block_id,
            interaction_type: data.interaction_type,
            metadata: data.metadata,
            created_at: Utc::now(),
        }
    }

    pub async fn create(mm: &ModelManager, data: ContentInteractionCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO content_interactions (id, user_id, content_block_id, interaction_type, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5, now())
            RETURNING id, user_id, content_block_id, interaction_type, metadata, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(data.content_block_id)
        .bind(data.interaction_type.as_str())
        .bind(&data.metadata)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }
}
