use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::missing;
use crate::{
    model::entity::UserProgressUpsert,
    web::{WebError, WebResult},
};

/// `POST /user-progress`, one (user, section) row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProgressBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    /// 0..=100; defaults to 100 when completed, 0 otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<i32>,
}

impl UserProgressBody {
    pub fn validate(self) -> WebResult<UserProgressUpsert> {
        let (user_id, course_id, section_id) = match (self.user_id, self.course_id, self.section_id) {
            (Some(user_id), Some(course_id), Some(section_id)) => (user_id, course_id, section_id),
            (user_id, course_id, section_id) => {
                return Err(WebError::missing_fields(missing(&[
                    ("userId", user_id.is_none()),
                    ("courseId", course_id.is_none()),
                    ("sectionId", section_id.is_none()),
                ])));
            }
        };

        let is_completed = self.is_completed.unwrap_or(false);
        let completion_percentage = self
            .completion_percentage
            .unwrap_or(if is_completed { 100 } else { 0 });
        if !(0..=100).contains(&completion_percentage) {
            return Err(WebError::invalid_field(
                "completionPercentage",
                "must be between 0 and 100",
            ));
        }

        Ok(UserProgressUpsert {
            user_id,
            course_id,
            section_id,
            is_completed,
            completion_percentage,
            time_spent_seconds: self.time_spent.unwrap_or(0).max(0),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserProgressQuery {
    pub course_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
}
