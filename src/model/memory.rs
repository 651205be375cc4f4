//! In-process store for development (`database_uri = "memory://"`) and tests.
//!
//! Content (courses, sections, blocks, questions) is authored through the
//! `insert_*` helpers; the HTTP surface only ever reads it.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{
    DatabaseError, DatabaseResult, LmsStore,
    entity::{
        ContentBlock, ContentInteraction, ContentInteractionCreate, Course, CourseFilter,
        CourseSection, ProgressFilter, QuizAttempt, QuizAttemptCreate, QuizAttemptFilter,
        QuizQuestion, UserEntity, UserEntityCreate, UserProgress, UserProgressUpsert,
    },
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserEntity>,
    courses: Vec<Course>,
    sections: Vec<CourseSection>,
    blocks: Vec<ContentBlock>,
    questions: Vec<QuizQuestion>,
    attempts: Vec<QuizAttempt>,
    progress: Vec<UserProgress>,
    interactions: Vec<ContentInteraction>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of [`LmsStore`] operations served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// While set, every [`LmsStore`] operation fails with
    /// [`DatabaseError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn enter(&self) -> DatabaseResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable);
        }
        Ok(())
    }

    pub async fn insert_course(&self, course: Course) {
        self.tables.write().await.courses.push(course);
    }

    pub async fn insert_section(&self, section: CourseSection) {
        self.tables.write().await.sections.push(section);
    }

    pub async fn insert_block(&self, block: ContentBlock) {
        self.tables.write().await.blocks.push(block);
    }

    pub async fn insert_question(&self, question: QuizQuestion) {
        self.tables.write().await.questions.push(question);
    }

    pub async fn interactions(&self) -> Vec<ContentInteraction> {
        self.tables.read().await.interactions.clone()
    }
}

#[async_trait::async_trait]
impl LmsStore for MemoryStore {
    async fn find_user_by_id(&self, id: Uuid) -> DatabaseResult<Option<UserEntity>> {
        self.enter()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> DatabaseResult<Option<UserEntity>> {
        self.enter()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_user(&self, data: UserEntityCreate) -> DatabaseResult<UserEntity> {
        self.enter()?;
        let user = UserEntity::new(Uuid::new_v4(), data);
        self.tables.write().await.users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> DatabaseResult<Vec<UserEntity>> {
        self.enter()?;
        let mut users = self.tables.read().await.users.clone();
        users.sort_by(|a, b| a.full_name().cmp(b.full_name()));
        Ok(users)
    }

    async fn list_courses(&self, filter: &CourseFilter) -> DatabaseResult<Vec<Course>> {
        self.enter()?;
        let tables = self.tables.read().await;
        let mut courses: Vec<Course> = tables
            .courses
            .iter()
            .filter(|c| c.is_published && filter.matches(c))
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(courses)
    }

    async fn count_courses(&self) -> DatabaseResult<i64> {
        self.enter()?;
        let tables = self.tables.read().await;
        Ok(tables.courses.iter().filter(|c| c.is_published).count() as i64)
    }

    async fn sections_by_course(&self, course_id: Uuid) -> DatabaseResult<Vec<CourseSection>> {
        self.enter()?;
        let tables = self.tables.read().await;
        let mut sections: Vec<CourseSection> = tables
            .sections
            .iter()
            .filter(|s| s.course_id == course_id && s.is_published)
            .cloned()
            .collect();
        sections.sort_by_key(|s| s.order_index);
        Ok(sections)
    }

    async fn find_section(&self, id: Uuid) -> DatabaseResult<Option<CourseSection>> {
        self.enter()?;
        let tables = self.tables.read().await;
        Ok(tables
            .sections
            .iter()
            .find(|s| s.id == id && s.is_published)
            .cloned())
    }

    async fn blocks_by_section(&self, section_id: Uuid) -> DatabaseResult<Vec<ContentBlock>> {
        self.enter()?;
        let tables = self.tables.read().await;
        let mut blocks: Vec<ContentBlock> = tables
            .blocks
            .iter()
            .filter(|b| b.section_id == section_id)
            .cloned()
            .collect();
        blocks.sort_by_key(|b| b.order_index);
        Ok(blocks)
    }

    async fn questions_by_section(&self, section_id: Uuid) -> DatabaseResult<Vec<QuizQuestion>> {
        self.enter()?;
        let tables = self.tables.read().await;
        let mut questions: Vec<QuizQuestion> = tables
            .questions
            .iter()
            .filter(|q| q.section_id == section_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.order_index);
        Ok(questions)
    }

    async fn insert_quiz_attempt(&self, data: QuizAttemptCreate) -> DatabaseResult<QuizAttempt> {
        self.enter()?;
        let attempt = QuizAttempt::from_create(Uuid::new_v4(), data);
        self.tables.write().await.attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn list_quiz_attempts(
        &self,
        filter: &QuizAttemptFilter,
    ) -> DatabaseResult<Vec<QuizAttempt>> {
        self.enter()?;
        let tables = self.tables.read().await;
        // inserted in time order, so newest first is a reversal
        Ok(tables
            .attempts
            .iter()
            .rev()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn count_quiz_attempts(&self, user_id: Uuid) -> DatabaseResult<i64> {
        self.enter()?;
        let tables = self.tables.read().await;
        Ok(tables.attempts.iter().filter(|a| a.user_id == user_id).count() as i64)
    }

    async fn count_correct_attempts(&self, user_id: Uuid) -> DatabaseResult<i64> {
        self.enter()?;
        let tables = self.tables.read().await;
        Ok(tables
            .attempts
            .iter()
            .filter(|a| a.user_id == user_id && a.is_correct)
            .count() as i64)
    }

    async fn upsert_progress(&self, data: UserProgressUpsert) -> DatabaseResult<UserProgress> {
        self.enter()?;
        let mut tables = self.tables.write().await;
        let position = tables
            .progress
            .iter()
            .position(|p| p.user_id == data.user_id && p.section_id == data.section_id);

        let row = match position {
            Some(i) => {
                let existing = tables.progress.remove(i);
                UserProgress::merge(Some(existing), data)
            }
            None => UserProgress::merge(None, data),
        };
        // keep rows ordered by update time
        tables.progress.push(row.clone());
        Ok(row)
    }

    async fn list_progress(&self, filter: &ProgressFilter) -> DatabaseResult<Vec<UserProgress>> {
        self.enter()?;
        let tables = self.tables.read().await;
        Ok(tables
            .progress
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn count_completed_sections(&self, user_id: Uuid) -> DatabaseResult<i64> {
        self.enter()?;
        let tables = self.tables.read().await;
        Ok(tables
            .progress
            .iter()
            .filter(|p| p.user_id == user_id && p.is_completed)
            .count() as i64)
    }

    async fn insert_interaction(
        &self,
        data: ContentInteractionCreate,
    ) -> DatabaseResult<ContentInteraction> {
        self.enter()?;
        let interaction = ContentInteraction::from_create(Uuid::new_v4(), data);
        self.tables
            .write()
            .await
            .interactions
            .push(interaction.clone());
        Ok(interaction)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::web::UserRole;

    fn progress(user_id: Uuid, course_id: Uuid, section_id: Uuid, done: bool) -> UserProgressUpsert {
        UserProgressUpsert {
            user_id,
            course_id,
            section_id,
            is_completed: done,
            completion_percentage: if done { 100 } else { 0 },
            time_spent_seconds: 30,
        }
    }

    #[tokio::test]
    async fn progress_upsert_keeps_one_row_per_section() {
        let store = MemoryStore::new();
        let (user, course, section) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let first = store.upsert_progress(progress(user, course, section, false)).await.unwrap();
        let second = store.upsert_progress(progress(user, course, section, true)).await.unwrap();

        assert_eq!(first.id, second.id);
        let rows = store.list_progress(&ProgressFilter::default()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_completed);
        assert_eq!(store.count_completed_sections(user).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn attempts_are_listed_newest_first() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let question = Uuid::new_v4();
        for answer in ["a", "b", "c"] {
            store
                .insert_quiz_attempt(QuizAttemptCreate {
                    user_id: user,
                    quiz_question_id: question,
                    user_answer: answer.to_string(),
                    is_correct: answer == "c",
                    time_spent_seconds: 0,
                })
                .await
                .unwrap();
        }

        let listed = store
            .list_quiz_attempts(&QuizAttemptFilter {
                user_id: Some(user),
                quiz_question_id: None,
            })
            .await
            .unwrap();
        let answers: Vec<&str> = listed.iter().map(|a| a.user_answer.as_str()).collect();
        assert_eq!(answers, vec!["c", "b", "a"]);
        assert_eq!(store.count_correct_attempts(user).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unavailable_store_fails_and_counts() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let result = store.find_user_by_email("x@y.z").await;
        assert!(matches!(result, Err(DatabaseError::Unavailable)));
        assert_eq!(store.calls(), 1);

        store.set_unavailable(false);
        let created = store
            .create_user(UserEntityCreate {
                email: String::from("X@Y.z"),
                full_name: String::from("X"),
                password_hash: String::new(),
                role: UserRole::User,
                job_title: String::new(),
            })
            .await
            .unwrap();
        let found = store.find_user_by_email("x@y.z").await.unwrap().unwrap();
        assert_eq!(found.id(), created.id());
        assert_eq!(store.calls(), 3);
    }
}
