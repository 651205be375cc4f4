use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourceType {
    User,
    Course,
    CourseSection,
    ContentBlock,
    QuizQuestion,
    QuizAttempt,
    UserProgress,
    ContentInteraction,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::User => "user",
            Self::Course => "course",
            Self::CourseSection => "course section",
            Self::ContentBlock => "content block",
            Self::QuizQuestion => "quiz question",
            Self::QuizAttempt => "quiz attempt",
            Self::UserProgress => "user progress",
            Self::ContentInteraction => "content interaction",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, limit: i64, offset: i64) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    /// Cuts one page out of an already filtered list.
    pub fn slice(all: Vec<T>, limit: i64, offset: i64) -> Self {
        let total = all.len() as i64;
        let items = all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Self::new(items, total, limit, offset)
    }
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}
