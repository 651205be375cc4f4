use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::web::{WebError, WebResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CourseSectionsQuery {
    pub course_id: Option<Uuid>,
}

impl CourseSectionsQuery {
    pub fn course_id(&self) -> WebResult<Uuid> {
        self.course_id
            .ok_or_else(|| WebError::missing_fields(vec!["courseId"]))
    }
}

/// Shared by the block and question listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SectionContentQuery {
    pub section_id: Option<Uuid>,
}

impl SectionContentQuery {
    pub fn section_id(&self) -> WebResult<Uuid> {
        self.section_id
            .ok_or_else(|| WebError::missing_fields(vec!["sectionId"]))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionHtml {
    pub section_id: Uuid,
    pub section_key: String,
    pub title: String,
    pub html: String,
}
