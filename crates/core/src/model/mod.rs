mod exercise;
mod passage;
mod question;
pub mod session;

pub use exercise::{Exercise, ExerciseDraft, ExerciseError};
pub use passage::{ReadingPassage, paragraph_label};
pub use question::{ParseQuestionTypeError, Question, QuestionType};
pub use session::{Epoch, INITIAL_TIME_SECS, Session, SessionStatus, Tick};
