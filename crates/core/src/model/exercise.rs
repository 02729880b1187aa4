use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::passage::ReadingPassage;
use crate::model::question::{ParseQuestionTypeError, Question, QuestionType};

//
// ─── EXERCISE TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated exercise as handed over by a content source.
///
/// Indices are signed so that negative values coming off the wire can be
/// reported instead of silently wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub question_type: String,
    pub question_text: String,
    pub correct_paragraphs: Vec<i64>,
    pub explanation: String,
    pub answer: String,
}

/// One passage paired with one question. Only obtainable through
/// [`ExerciseDraft::validate`], so every `Exercise` is structurally sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    passage: ReadingPassage,
    question: Question,
}

//
// ─── EXERCISE VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("passage title cannot be empty")]
    EmptyTitle,

    #[error("passage has no paragraphs")]
    NoParagraphs,

    #[error("paragraph {index} is empty")]
    EmptyParagraph { index: usize },

    #[error(transparent)]
    QuestionType(#[from] ParseQuestionTypeError),

    #[error("question text cannot be empty")]
    EmptyQuestionText,

    #[error("explanation cannot be empty")]
    EmptyExplanation,

    #[error("answer cannot be empty")]
    EmptyAnswer,

    #[error("question names no evidence paragraphs")]
    NoCorrectParagraphs,

    #[error("evidence paragraph {index} is out of range for {count} paragraphs")]
    ParagraphOutOfRange { index: i64, count: usize },
}

//
// ─── VALIDATION ────────────────────────────────────────────────────────────────
//

impl ExerciseDraft {
    /// Check every structural obligation and build an [`Exercise`].
    ///
    /// Text fields are trimmed. Duplicate evidence indices collapse into one.
    ///
    /// # Errors
    ///
    /// Returns the first `ExerciseError` found, checking the passage before the
    /// question.
    pub fn validate(self) -> Result<Exercise, ExerciseError> {
        let title = non_empty(self.title, ExerciseError::EmptyTitle)?;

        if self.paragraphs.is_empty() {
            return Err(ExerciseError::NoParagraphs);
        }
        let paragraphs = self
            .paragraphs
            .into_iter()
            .enumerate()
            .map(|(index, text)| non_empty(text, ExerciseError::EmptyParagraph { index }))
            .collect::<Result<Vec<_>, _>>()?;

        let question_type: QuestionType = self.question_type.parse()?;
        let question_text = non_empty(self.question_text, ExerciseError::EmptyQuestionText)?;
        let explanation = non_empty(self.explanation, ExerciseError::EmptyExplanation)?;
        let answer = non_empty(self.answer, ExerciseError::EmptyAnswer)?;

        if self.correct_paragraphs.is_empty() {
            return Err(ExerciseError::NoCorrectParagraphs);
        }
        let count = paragraphs.len();
        let correct = self
            .correct_paragraphs
            .into_iter()
            .map(|raw| {
                usize::try_from(raw)
                    .ok()
                    .filter(|index| *index < count)
                    .ok_or(ExerciseError::ParagraphOutOfRange { index: raw, count })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Exercise {
            passage: ReadingPassage::new(title, paragraphs),
            question: Question::new(question_type, question_text, correct, explanation, answer),
        })
    }
}

fn non_empty(value: String, err: ExerciseError) -> Result<String, ExerciseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_string())
}

impl Exercise {
    #[must_use]
    pub fn passage(&self) -> &ReadingPassage {
        &self.passage
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Whether `index` addresses a paragraph of this exercise's passage.
    #[must_use]
    pub fn is_valid_index(&self, index: usize) -> bool {
        self.passage.contains_index(index)
    }
}
