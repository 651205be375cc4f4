//! Assembles one course into a navigable, gradable view for a learner.

mod api;
pub use api::{CourseApi, StoreApi};

mod error;
pub use error::{LearningError, LearningResult};

mod progress;
pub use progress::CourseProgress;

mod state;
pub use state::{
    CourseLearning, LearningData, LearningSection, LocalAttempt, QuizResult, SectionQuizResults,
    Session,
};

mod telemetry;
pub use telemetry::{Telemetry, TrackedInteraction};
