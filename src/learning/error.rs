use thiserror::Error;

use crate::{client::ClientError, model::DatabaseError};

pub type LearningResult<T> = std::result::Result<T, LearningError>;

/// `Display` is the string kept as the view's error.
#[derive(Debug, Error)]
pub enum LearningError {
    #[error("Course not found")]
    CourseNotFound,
    #[error("Section not found")]
    SectionNotFound,
    #[error("Course is not loaded")]
    NotLoaded,
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("Failed to fetch course data")]
    Store(#[from] DatabaseError),
}
