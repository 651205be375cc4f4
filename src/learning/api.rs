use std::sync::Arc;

use uuid::Uuid;

use crate::{
    client::LmsClient,
    learning::LearningResult,
    model::{
        LmsStore,
        entity::{
            ContentBlock, ContentInteraction, ContentInteractionCreate, Course, CourseFilter,
            CourseSection, ProgressFilter, QuizAttempt, QuizAttemptCreate, QuizQuestion,
            UserProgress, UserProgressUpsert,
        },
    },
    web::dto::{
        interaction::ContentInteractionBody,
        progress::{UserProgressBody, UserProgressQuery},
        quiz::QuizAttemptBody,
    },
};

/// The reads and writes the learning view needs, whether it talks to a
/// server over HTTP or to a store in-process.
#[async_trait::async_trait]
pub trait CourseApi: Send + Sync {
    async fn course_by_slug(&self, slug: &str) -> LearningResult<Option<Course>>;
    async fn course_sections(&self, course_id: Uuid) -> LearningResult<Vec<CourseSection>>;
    async fn content_blocks(&self, section_id: Uuid) -> LearningResult<Vec<ContentBlock>>;
    async fn quiz_questions(&self, section_id: Uuid) -> LearningResult<Vec<QuizQuestion>>;
    async fn course_progress(&self, user_id: Uuid, course_id: Uuid) -> LearningResult<Vec<UserProgress>>;

    async fn save_progress(&self, data: UserProgressUpsert) -> LearningResult<UserProgress>;
    async fn record_quiz_attempt(&self, data: QuizAttemptCreate) -> LearningResult<QuizAttempt>;
    async fn record_interaction(
        &self,
        data: ContentInteractionCreate,
    ) -> LearningResult<ContentInteraction>;
}

/// The HTTP client acts for whoever its session cookie names, so the user id
/// arguments only travel in request bodies.
#[async_trait::async_trait]
impl CourseApi for LmsClient {
    async fn course_by_slug(&self, slug: &str) -> LearningResult<Option<Course>> {
        Ok(LmsClient::course_by_slug(self, slug).await?)
    }

    async fn course_sections(&self, course_id: Uuid) -> LearningResult<Vec<CourseSection>> {
        Ok(LmsClient::course_sections(self, course_id).await?)
    }

    async fn content_blocks(&self, section_id: Uuid) -> LearningResult<Vec<ContentBlock>> {
        Ok(LmsClient::content_blocks(self, section_id).await?)
    }

    async fn quiz_questions(&self, section_id: Uuid) -> LearningResult<Vec<QuizQuestion>> {
        Ok(LmsClient::quiz_questions(self, section_id).await?)
    }

    async fn course_progress(&self, _user_id: Uuid, course_id: Uuid) -> LearningResult<Vec<UserProgress>> {
        let query = UserProgressQuery {
            course_id: Some(course_id),
            section_id: None,
        };
        Ok(self.progress(&query).await?)
    }

    async fn save_progress(&self, data: UserProgressUpsert) -> LearningResult<UserProgress> {
        let body = UserProgressBody {
            user_id: Some(data.user_id),
            course_id: Some(data.course_id),
            section_id: Some(data.section_id),
            is_completed: Some(data.is_completed),
            completion_percentage: Some(data.completion_percentage),
            time_spent: Some(data.time_spent_seconds),
        };
        Ok(self.upsert_progress(&body).await?)
    }

    async fn record_quiz_attempt(&self, data: QuizAttemptCreate) -> LearningResult<QuizAttempt> {
        let body = QuizAttemptBody {
            user_id: Some(data.user_id),
            quiz_question_id: Some(data.quiz_question_id),
            user_answer: Some(data.user_answer),
            is_correct: Some(data.is_correct),
            time_spent: Some(data.time_spent_seconds),
        };
        Ok(LmsClient::record_quiz_attempt(self, &body).await?)
    }

    async fn record_interaction(
        &self,
        data: ContentInteractionCreate,
    ) -> LearningResult<ContentInteraction> {
        let body = ContentInteractionBody {
            user_id: Some(data.user_id),
            content_block_id: Some(data.content_block_id),
            interaction_type: Some(data.interaction_type),
            metadata: Some(data.metadata),
        };
        Ok(LmsClient::record_interaction(self, &body).await?)
    }
}

/// Reads and writes a store directly; used by the server's own learning
/// endpoint.
#[derive(Clone)]
pub struct StoreApi {
    store: Arc<dyn LmsStore>,
}

impl StoreApi {
    pub fn new(store: Arc<dyn LmsStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl CourseApi for StoreApi {
    async fn course_by_slug(&self, slug: &str) -> LearningResult<Option<Course>> {
        let courses = self.store.list_courses(&CourseFilter::by_slug(slug)).await?;
        Ok(courses.into_iter().next())
    }

    async fn course_sections(&self, course_id: Uuid) -> LearningResult<Vec<CourseSection>> {
        Ok(self.store.sections_by_course(course_id).await?)
    }

    async fn content_blocks(&self, section_id: Uuid) -> LearningResult<Vec<ContentBlock>> {
        Ok(self.store.blocks_by_section(section_id).await?)
    }

    async fn quiz_questions(&self, section_id: Uuid) -> LearningResult<Vec<QuizQuestion>> {
        Ok(self.store.questions_by_section(section_id).await?)
    }

    async fn course_progress(&self, user_id: Uuid, course_id: Uuid) -> LearningResult<Vec<UserProgress>> {
        let filter = ProgressFilter {
            user_id: Some(user_id),
            course_id: Some(course_id),
            section_id: None,
        };
        Ok(self.store.list_progress(&filter).await?)
    }

    async fn save_progress(&self, data: UserProgressUpsert) -> LearningResult<UserProgress> {
        Ok(self.store.upsert_progress(data).await?)
    }

    async fn record_quiz_attempt(&self, data: QuizAttemptCreate) -> LearningResult<QuizAttempt> {
        Ok(self.store.insert_quiz_attempt(data).await?)
    }

    async fn record_interaction(
        &self,
        data: ContentInteractionCreate,
    ) -> LearningResult<ContentInteraction> {
        Ok(self.store.insert_interaction(data).await?)
    }
}
