use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// IELTS Academic Reading question families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionType {
    TrueFalseNotGiven,
    GapFilling,
    MatchingInformation,
    HeadingMatching,
    MultipleChoice,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::TrueFalseNotGiven,
        QuestionType::GapFilling,
        QuestionType::MatchingInformation,
        QuestionType::HeadingMatching,
        QuestionType::MultipleChoice,
    ];

    /// Human-facing label, also used on the wire.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::TrueFalseNotGiven => "True/False/Not Given",
            QuestionType::GapFilling => "Gap Filling",
            QuestionType::MatchingInformation => "Matching Information",
            QuestionType::HeadingMatching => "Heading Matching",
            QuestionType::MultipleChoice => "Multiple Choice",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown question type: {0}")]
pub struct ParseQuestionTypeError(pub String);

impl FromStr for QuestionType {
    type Err = ParseQuestionTypeError;

    /// Accepts the display label or the variant name in any case, with
    /// spaces, `_`, `-` and `/` ignored ("Gap Filling", "GAP_FILLING", "gap-filling").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let parsed = match key.as_str() {
            "truefalsenotgiven" => QuestionType::TrueFalseNotGiven,
            "gapfilling" => QuestionType::GapFilling,
            "matchinginformation" => QuestionType::MatchingInformation,
            "headingmatching" | "matchingheadings" => QuestionType::HeadingMatching,
            "multiplechoice" => QuestionType::MultipleChoice,
            _ => return Err(ParseQuestionTypeError(s.to_string())),
        };
        Ok(parsed)
    }
}

/// One question about a passage, with the set of paragraphs holding its evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    question_type: QuestionType,
    question_text: String,
    correct_paragraphs: BTreeSet<usize>,
    explanation: String,
    answer: String,
}

impl Question {
    pub(crate) fn new(
        question_type: QuestionType,
        question_text: String,
        correct_paragraphs: BTreeSet<usize>,
        explanation: String,
        answer: String,
    ) -> Self {
        Self {
            question_type,
            question_text,
            correct_paragraphs,
            explanation,
            answer,
        }
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    /// Paragraph indices containing the evidence. Never empty.
    #[must_use]
    pub fn correct_paragraphs(&self) -> &BTreeSet<usize> {
        &self.correct_paragraphs
    }

    #[must_use]
    pub fn is_evidence(&self, index: usize) -> bool {
        self.correct_paragraphs.contains(&index)
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Literal answer for display; never machine-checked.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}
