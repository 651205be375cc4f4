use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult};
use crate::render::BlockBody;

/// A content block as stored: the tag plus its untyped payload. Use
/// [`ContentBlock::body`] to get the typed form.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub id: Uuid,
    pub section_id: Uuid,
    pub block_type: String,
    pub order_index: i32,
    #[schema(value_type = Object)]
    pub content: serde_json::Value,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

impl ResourceTyped for ContentBlock {
    fn get_resource_type() -> ResourceType {
        ResourceType::ContentBlock
    }
}

impl ContentBlock {
    pub fn body(&self) -> BlockBody {
        BlockBody::decode(&self.block_type, &self.content, self.metadata.as_ref())
    }
}

impl ContentBlock {
    pub async fn all_by_section(mm: &ModelManager, section_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT id, section_id, block_type, order_index, content, metadata FROM content_blocks WHERE section_id = $1 ORDER BY order_index ASC",
        )
        .bind(section_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }
}
