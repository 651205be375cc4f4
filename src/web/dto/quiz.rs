use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{missing, present};
use crate::{
    model::entity::{QuizAttemptCreate, QuizAttemptFilter},
    web::{WebError, WebResult},
};

/// `POST /quiz-attempts`. `isCorrect` is taken as reported by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttemptBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_question_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    /// Seconds, defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<i32>,
}

impl QuizAttemptBody {
    pub fn validate(self) -> WebResult<QuizAttemptCreate> {
        match (
            self.user_id,
            self.quiz_question_id,
            present(self.user_answer),
            self.is_correct,
        ) {
            (Some(user_id), Some(quiz_question_id), Some(user_answer), Some(is_correct)) => {
                Ok(QuizAttemptCreate {
                    user_id,
                    quiz_question_id,
                    user_answer,
                    is_correct,
                    time_spent_seconds: self.time_spent.unwrap_or(0).max(0),
                })
            }
            (user_id, quiz_question_id, user_answer, is_correct) => {
                Err(WebError::missing_fields(missing(&[
                    ("userId", user_id.is_none()),
                    ("quizQuestionId", quiz_question_id.is_none()),
                    ("userAnswer", user_answer.is_none()),
                    ("isCorrect", is_correct.is_none()),
                ])))
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct QuizAttemptQuery {
    pub user_id: Option<Uuid>,
    pub quiz_question_id: Option<Uuid>,
}

impl From<QuizAttemptQuery> for QuizAttemptFilter {
    fn from(value: QuizAttemptQuery) -> Self {
        Self {
            user_id: value.user_id,
            quiz_question_id: value.quiz_question_id,
        }
    }
}
