use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::missing;
use crate::{
    model::entity::{ContentInteractionCreate, InteractionType},
    web::{WebError, WebResult},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentInteractionBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_block_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<InteractionType>,
    /// Free-form, defaults to `{}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

impl ContentInteractionBody {
    pub fn validate(self) -> WebResult<ContentInteractionCreate> {
        match (self.user_id, self.content_block_id, self.interaction_type) {
            (Some(user_id), Some(content_block_id), Some(interaction_type)) => {
                Ok(ContentInteractionCreate {
                    user_id,
                    content_block_id,
                    interaction_type,
                    metadata: self
                        .metadata
                        .filter(|m| !m.is_null())
                        .unwrap_or_else(|| serde_json::json!({})),
                })
            }
            (user_id, content_block_id, interaction_type) => {
                Err(WebError::missing_fields(missing(&[
                    ("userId", user_id.is_none()),
                    ("contentBlockId", content_block_id.is_none()),
                    ("interactionType", interaction_type.is_none()),
                ])))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn metadata_defaults_to_empty_object() {
        let create = ContentInteractionBody {
            user_id: Some(Uuid::new_v4()),
            content_block_id: Some(Uuid::new_v4()),
            interaction_type: Some(InteractionType::Expand),
            metadata: None,
        }
        .validate()
        .unwrap();
        assert_eq!(create.metadata, serde_json::json!({}));
    }
}
