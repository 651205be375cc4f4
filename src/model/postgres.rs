use uuid::Uuid;

use crate::model::{
    DatabaseResult, LmsStore, ModelManager,
    entity::{
        ContentBlock, ContentInteraction, ContentInteractionCreate, Course, CourseFilter,
        CourseSection, ProgressFilter, QuizAttempt, QuizAttemptCreate, QuizAttemptFilter,
        QuizQuestion, UserEntity, UserEntityCreate, UserProgress, UserProgressUpsert,
    },
};

/// Postgres-backed store; each method is one entity query.
#[derive(Debug, Clone)]
pub struct PgStore {
    mm: ModelManager,
}

impl PgStore {
    pub fn new(mm: ModelManager) -> Self {
        Self { mm }
    }
}

#[async_trait::async_trait]
impl LmsStore for PgStore {
    async fn find_user_by_id(&self, id: Uuid) -> DatabaseResult<Option<UserEntity>> {
        UserEntity::find_by_id(&self.mm, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> DatabaseResult<Option<UserEntity>> {
        UserEntity::find_by_email(&self.mm, email).await
    }

    async fn create_user(&self, data: UserEntityCreate) -> DatabaseResult<UserEntity> {
        UserEntity::create(&self.mm, data).await
    }

    async fn list_users(&self) -> DatabaseResult<Vec<UserEntity>> {
        UserEntity::list(&self.mm).await
    }

    async fn list_courses(&self, filter: &CourseFilter) -> DatabaseResult<Vec<Course>> {
        let courses = Course::list_published(&self.mm, filter.slug.as_deref()).await?;
        Ok(courses.into_iter().filter(|c| filter.matches(c)).collect())
    }

    async fn count_courses(&self) -> DatabaseResult<i64> {
        Course::count_published(&self.mm).await
    }

    async fn sections_by_course(&self, course_id: Uuid) -> DatabaseResult<Vec<CourseSection>> {
        CourseSection::all_by_course(&self.mm, course_id).await
    }

    async fn find_section(&self, id: Uuid) -> DatabaseResult<Option<CourseSection>> {
        CourseSection::find_by_id(&self.mm, id).await
    }

    async fn blocks_by_section(&self, section_id: Uuid) -> DatabaseResult<Vec<ContentBlock>> {
        ContentBlock::all_by_section(&self.mm, section_id).await
    }

    async fn questions_by_section(&self, section_id: Uuid) -> DatabaseResult<Vec<QuizQuestion>> {
        QuizQuestion::all_by_section(&self.mm, section_id).await
    }

    async fn insert_quiz_attempt(&self, data: QuizAttemptCreate) -> DatabaseResult<QuizAttempt> {
        QuizAttempt::create(&self.mm, data).await
    }

    async fn list_quiz_attempts(
        &self,
        filter: &QuizAttemptFilter,
    ) -> DatabaseResult<Vec<QuizAttempt>> {
        QuizAttempt::list(&self.mm, filter).await
    }

    async fn count_quiz_attempts(&self, user_id: Uuid) -> DatabaseResult<i64> {
        QuizAttempt::count_by_user(&self.mm, user_id).await
    }

    async fn count_correct_attempts(&self, user_id: Uuid) -> DatabaseResult<i64> {
        QuizAttempt::count_correct_by_user(&self.mm, user_id).await
    }

    async fn upsert_progress(&self, data: UserProgressUpsert) -> DatabaseResult<UserProgress> {
        UserProgress::upsert(&self.mm, data).await
    }

    async fn list_progress(&self, filter: &ProgressFilter) -> DatabaseResult<Vec<UserProgress>> {
        UserProgress::list(&self.mm, filter).await
    }

    async fn count_completed_sections(&self, user_id: Uuid) -> DatabaseResult<i64> {
        UserProgress::count_completed(&self.mm, user_id).await
    }

    async fn insert_interaction(
        &self,
        data: ContentInteractionCreate,
    ) -> DatabaseResult<ContentInteraction> {
        ContentInteraction::create(&self.mm, data).await
    }
}
