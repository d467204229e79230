mod user;
pub use user::{UserEntity, UserEntityCreate};

mod course;
pub use course::{Course, CourseCreate};

mod module;
pub use module::{Module, ModuleCreate};

mod lesson;
pub use lesson::{Lesson, LessonCreate};

mod quiz;
pub use quiz::{Quiz, QuizCreate, QuizSummaryRow};

mod question;
pub use question::{Question, QuestionCreate};

mod student_progress;
pub use student_progress::{StudentProgress, StudentProgressCreate, StudentProgressRow};
