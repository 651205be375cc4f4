use uuid::Uuid;

use crate::model::{
    DatabaseResult,
    entity::{
        ContentBlock, ContentInteraction, ContentInteractionCreate, Course, CourseFilter,
        CourseSection, ProgressFilter, QuizAttempt, QuizAttemptCreate, QuizAttemptFilter,
        QuizQuestion, UserEntity, UserEntityCreate, UserProgress, UserProgressUpsert,
    },
};

/// Every backend operation the route handlers perform. One call per
/// operation; there are no multi-entity transactions.
///
/// Ordered listings (`sections_by_course`, `blocks_by_section`,
/// `questions_by_section`) come back sorted by `order_index` ascending, attempt
/// listings newest first.
#[async_trait::async_trait]
pub trait LmsStore: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> DatabaseResult<Option<UserEntity>>;
    async fn find_user_by_email(&self, email: &str) -> DatabaseResult<Option<UserEntity>>;
    async fn create_user(&self, data: UserEntityCreate) -> DatabaseResult<UserEntity>;
    async fn list_users(&self) -> DatabaseResult<Vec<UserEntity>>;

    async fn list_courses(&self, filter: &CourseFilter) -> DatabaseResult<Vec<Course>>;
    async fn count_courses(&self) -> DatabaseResult<i64>;
    async fn sections_by_course(&self, course_id: Uuid) -> DatabaseResult<Vec<CourseSection>>;
    async fn find_section(&self, id: Uuid) -> DatabaseResult<Option<CourseSection>>;
    async fn blocks_by_section(&self, section_id: Uuid) -> DatabaseResult<Vec<ContentBlock>>;
    async fn questions_by_section(&self, section_id: Uuid) -> DatabaseResult<Vec<QuizQuestion>>;

    async fn insert_quiz_attempt(&self, data: QuizAttemptCreate) -> DatabaseResult<QuizAttempt>;
    async fn list_quiz_attempts(&self, filter: &QuizAttemptFilter)
    -> DatabaseResult<Vec<QuizAttempt>>;
    async fn count_quiz_attempts(&self, user_id: Uuid) -> DatabaseResult<i64>;
    async fn count_correct_attempts(&self, user_id: Uuid) -> DatabaseResult<i64>;

    async fn upsert_progress(&self, data: UserProgressUpsert) -> DatabaseResult<UserProgress>;
    async fn list_progress(&self, filter: &ProgressFilter) -> DatabaseResult<Vec<UserProgress>>;
    async fn count_completed_sections(&self, user_id: Uuid) -> DatabaseResult<i64>;

    async fn insert_interaction(
        &self,
        data: ContentInteractionCreate,
    ) -> DatabaseResult<ContentInteraction>;
}
