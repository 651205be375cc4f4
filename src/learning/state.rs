use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    learning::{CourseApi, CourseProgress, LearningError, LearningResult, Telemetry, TrackedInteraction},
    model::entity::{
        ContentBlock, Course, CourseSection, InteractionType, QuizAttemptCreate, QuizQuestion,
        UserProgressUpsert,
    },
    navigation::{CourseNavigation, ModuleKind, ModuleSeed},
    render::{BlockKind, BlockRenderer},
};

/// Who the view acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Authenticated { user_id: Uuid },
}

impl Session {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user_id } => Some(*user_id),
        }
    }
}

/// A section with its blocks and questions, both ordered by `order_index`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningSection {
    #[serde(flatten)]
    pub section: CourseSection,
    pub blocks: Vec<ContentBlock>,
    pub questions: Vec<QuizQuestion>,
}

impl LearningSection {
    fn module_kind(&self) -> ModuleKind {
        if !self.questions.is_empty() {
            ModuleKind::Quiz
        } else if self
            .blocks
            .iter()
            .any(|block| block.block_type == BlockKind::Video.as_str())
        {
            ModuleKind::Video
        } else {
            ModuleKind::Reading
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningData {
    pub course: Course,
    pub sections: Vec<LearningSection>,
    pub progress: CourseProgress,
}

/// An answer as kept by the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalAttempt {
    pub question_id: Uuid,
    pub user_answer: String,
    pub is_correct: bool,
    pub attempted_at: DateTime<Utc>,
    pub time_spent: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SectionQuizResults {
    pub total: usize,
    pub correct: usize,
    pub percentage: f64,
}

/// Sections come back from one fetch; blocks and questions are fetched per
/// section concurrently. A failed per-section fetch leaves that list empty.
#[tracing::instrument(skip(api, session))]
async fn fetch_learning_data(
    api: Arc<dyn CourseApi>,
    slug: &str,
    session: Session,
) -> LearningResult<LearningData> {
    let course = api
        .course_by_slug(slug)
        .await?
        .ok_or(LearningError::CourseNotFound)?;
    let sections = api.course_sections(course.id).await?;

    let mut fetches = JoinSet::new();
    for (index, section) in sections.iter().enumerate() {
        let api = api.clone();
        let section_id = section.id;
        fetches.spawn(async move {
            let (blocks, questions) = tokio::join!(
                api.content_blocks(section_id),
                api.quiz_questions(section_id)
            );
            let blocks = blocks.unwrap_or_else(|e| {
                tracing::warn!("blocks of section {} unavailable: {}", section_id, e);
                Vec::new()
            });
            let questions = questions.unwrap_or_else(|e| {
                tracing::warn!("questions of section {} unavailable: {}", section_id, e);
                Vec::new()
            });
            (index, blocks, questions)
        });
    }

    let mut contents: Vec<(Vec<ContentBlock>, Vec<QuizQuestion>)> =
        sections.iter().map(|_| (Vec::new(), Vec::new())).collect();
    while let Some(joined) = fetches.join_next().await {
        match joined {
            Ok((index, blocks, questions)) => contents[index] = (blocks, questions),
            Err(e) => tracing::warn!("section fetch task failed: {}", e),
        }
    }

    let mut sections: Vec<LearningSection> = sections
        .into_iter()
        .zip(contents)
        .map(|(section, (mut blocks, mut questions))| {
            blocks.sort_by_key(|block| block.order_index);
            questions.sort_by_key(|question| question.order_index);
            LearningSection {
                section,
                blocks,
                questions,
            }
        })
        .collect();
    sections.sort_by_key(|s| s.section.order_index);

    let section_ids: Vec<Uuid> = sections.iter().map(|s| s.section.id).collect();
    let rows = match session.user_id() {
        Some(user_id) => api
            .course_progress(user_id, course.id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("stored progress unavailable, starting fresh: {}", e);
                Vec::new()
            }),
        None => Vec::new(),
    };
    let mut progress = CourseProgress::fold(&rows, &section_ids);
    progress.current_section_id = section_ids.first().copied();

    Ok(LearningData {
        course,
        sections,
        progress,
    })
}

/// Per-learner state of one course: loaded content, position, completion,
/// local quiz attempts and interactions.
pub struct CourseLearning {
    api: Arc<dyn CourseApi>,
    slug: String,
    session: Session,
    data: Option<LearningData>,
    loading: bool,
    error: Option<LearningError>,
    current_index: usize,
    attempts: Vec<LocalAttempt>,
    telemetry: Telemetry,
}

impl CourseLearning {
    pub fn new(api: Arc<dyn CourseApi>, slug: impl Into<String>, session: Session) -> Self {
        let telemetry = Telemetry::new(api.clone(), session.user_id());
        Self {
            api,
            slug: slug.into(),
            session,
            data: None,
            loading: true,
            error: None,
            current_index: 0,
            attempts: Vec::new(),
            telemetry,
        }
    }

    /// Fetches the course. State is only written once the fetch finishes;
    /// a cancelled load leaves everything as it was. A failed load drops
    /// whatever an earlier load produced.
    pub async fn load(&mut self, cancel: &CancellationToken) {
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("load of `{}` cancelled", self.slug);
                return;
            }
            fetched = fetch_learning_data(self.api.clone(), &self.slug, self.session) => fetched,
        };

        match fetched {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.current_index = 0;
            }
            Err(e) => {
                tracing::warn!("failed to load course `{}`: {}", self.slug, e);
                self.data = None;
                self.current_index = 0;
                self.error = Some(e);
            }
        }
        self.loading = false;
    }

    pub async fn refetch(&mut self, cancel: &CancellationToken) {
        self.loading = true;
        self.load(cancel).await;
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn data(&self) -> Option<&LearningData> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<LearningData> {
        self.data
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The message of the last failed load.
    pub fn error(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn failure(&self) -> Option<&LearningError> {
        self.error.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_section(&self) -> Option<&LearningSection> {
        self.data.as_ref()?.sections.get(self.current_index)
    }

    pub fn progress(&self) -> Option<&CourseProgress> {
        self.data.as_ref().map(|data| &data.progress)
    }

    pub fn quiz_attempts(&self) -> &[LocalAttempt] {
        &self.attempts
    }

    pub fn interactions(&self) -> Vec<TrackedInteraction> {
        self.telemetry.recorded()
    }

    pub fn track_interaction(&self, block_id: Uuid, kind: InteractionType, metadata: serde_json::Value) {
        self.telemetry.track(block_id, kind, metadata);
    }

    /// Out-of-range indices are ignored. Returns whether the view moved.
    pub fn navigate_to(&mut self, index: usize) -> bool {
        let Some(data) = self.data.as_mut() else {
            return false;
        };
        let Some(section) = data.sections.get(index) else {
            return false;
        };

        let section_id = section.section.id;
        let metadata = json!({
            "sectionKey": section.section.section_key,
            "sectionIndex": index,
        });
        data.progress.visit(section_id);
        self.current_index = index;

        self.telemetry
            .track(section_id, InteractionType::View, metadata);
        true
    }

    pub fn next(&mut self) -> bool {
        let len = self.data.as_ref().map_or(0, |data| data.sections.len());
        if self.current_index + 1 < len {
            self.navigate_to(self.current_index + 1)
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.current_index > 0 {
            self.navigate_to(self.current_index - 1)
        } else {
            false
        }
    }

    /// Completing a section twice is a no-op. Signed-in learners only see the
    /// change once the server has stored it.
    #[tracing::instrument(skip(self))]
    pub async fn mark_section_complete(&mut self, section_id: Uuid) -> LearningResult<()> {
        let data = self.data.as_ref().ok_or(LearningError::NotLoaded)?;
        if !data.sections.iter().any(|s| s.section.id == section_id) {
            return Err(LearningError::SectionNotFound);
        }
        if data.progress.is_completed(section_id) {
            return Ok(());
        }
        let course_id = data.course.id;

        if let Session::Authenticated { user_id } = self.session {
            self.api
                .save_progress(UserProgressUpsert {
                    user_id,
                    course_id,
                    section_id,
                    is_completed: true,
                    completion_percentage: 100,
                    time_spent_seconds: 0,
                })
                .await?;
        }

        let data = self.data.as_mut().ok_or(LearningError::NotLoaded)?;
        let total = data.sections.len();
        data.progress.complete(section_id, total);
        Ok(())
    }

    /// Grades `answer` by exact comparison. `None` when no loaded section
    /// has the question. Signed-in attempts are sent in the background.
    pub fn submit_quiz_answer(&mut self, question_id: Uuid, answer: &str) -> Option<QuizResult> {
        let question = self
            .data
            .as_ref()?
            .sections
            .iter()
            .flat_map(|s| s.questions.iter())
            .find(|q| q.id == question_id)?;

        let is_correct = question.is_correct(answer);
        let result = QuizResult {
            is_correct,
            correct_answer: question.correct_answer.clone(),
            explanation: question.explanation.clone(),
        };

        self.attempts.push(LocalAttempt {
            question_id,
            user_answer: answer.to_string(),
            is_correct,
            attempted_at: Utc::now(),
            time_spent: 0,
        });

        if let Session::Authenticated { user_id } = self.session {
            let api = self.api.clone();
            let data = QuizAttemptCreate {
                user_id,
                quiz_question_id: question_id,
                user_answer: answer.to_string(),
                is_correct,
                time_spent_seconds: 0,
            };
            self.telemetry.spawn(async move {
                if let Err(e) = api.record_quiz_attempt(data).await {
                    tracing::warn!("failed to save quiz attempt: {}", e);
                }
            });
        }

        Some(result)
    }

    /// The first section is always open; any other one once its predecessor
    /// is completed.
    pub fn is_section_accessible(&self, index: usize) -> bool {
        if index == 0 {
            return true;
        }
        let Some(data) = self.data.as_ref() else {
            return false;
        };
        if index >= data.sections.len() {
            return false;
        }
        data.progress
            .is_completed(data.sections[index - 1].section.id)
    }

    /// A question counts as correct when its latest local attempt was.
    pub fn section_quiz_results(&self, section_id: Uuid) -> SectionQuizResults {
        let empty = SectionQuizResults {
            total: 0,
            correct: 0,
            percentage: 0.0,
        };
        let Some(section) = self
            .data
            .as_ref()
            .and_then(|data| data.sections.iter().find(|s| s.section.id == section_id))
        else {
            return empty;
        };

        let total = section.questions.len();
        let correct = section
            .questions
            .iter()
            .filter(|q| {
                self.attempts
                    .iter()
                    .rev()
                    .find(|a| a.question_id == q.id)
                    .is_some_and(|a| a.is_correct)
            })
            .count();
        let percentage = if total > 0 {
            correct as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        SectionQuizResults {
            total,
            correct,
            percentage,
        }
    }

    /// Renders section `index`, reporting a view for each block the first
    /// time it is shown.
    pub fn render_section(&self, index: usize) -> Option<String> {
        let section = self.data.as_ref()?.sections.get(index)?;
        Some(BlockRenderer::with_sink(&self.telemetry).render_section(&section.blocks))
    }

    pub fn navigation(&self) -> Option<CourseNavigation> {
        let data = self.data.as_ref()?;
        let seeds = data
            .sections
            .iter()
            .map(|s| ModuleSeed {
                id: s.section.id,
                title: s.section.title.clone(),
                href: format!("/courses/{}/learn/{}", data.course.slug, s.section.section_key),
                kind: s.module_kind(),
                completed: data.progress.is_completed(s.section.id),
            })
            .collect();
        Some(CourseNavigation::build(
            data.course.title.clone(),
            seeds,
            Some(self.current_index),
        ))
    }

    /// Waits for background sends dispatched so far.
    pub async fn settle(&self) {
        self.telemetry.settle().await;
    }
}
