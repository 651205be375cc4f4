mod user;
pub use user::{UserEntity, UserEntityCreate};

mod course;
pub use course::{Course, CourseFilter};

mod course_section;
pub use course_section::CourseSection;

mod content_block;
pub use content_block::ContentBlock;

mod quiz_question;
pub use quiz_question::{QuestionType, QuizQuestion};

mod quiz_attempt;
pub use quiz_attempt::{QuizAttempt, QuizAttemptCreate, QuizAttemptFilter};

mod user_progress;
pub use user_progress::{ProgressFilter, UserProgress, UserProgressUpsert};

mod content_interaction;
pub use content_interaction::{ContentInteraction, ContentInteractionCreate, InteractionType};
