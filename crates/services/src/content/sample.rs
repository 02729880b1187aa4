use async_trait::async_trait;

use ielts_core::model::{Exercise, QuestionType};

use super::{ContentProvider, parse_exercise};
use crate::error::ContentError;

const SAMPLE_EXERCISE: &str = include_str!("sample_exercise.json");

/// Serves a bundled exercise without touching the network.
///
/// The question type hint is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleContentProvider;

#[async_trait]
impl ContentProvider for SampleContentProvider {
    async fn generate_exercise(
        &self,
        _hint: Option<QuestionType>,
    ) -> Result<Exercise, ContentError> {
        parse_exercise(SAMPLE_EXERCISE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bundled_exercise_is_valid() {
        let exercise = SampleContentProvider
            .generate_exercise(None)
            .await
            .unwrap();
        assert_eq!(exercise.passage().paragraph_count(), 9);
        assert_eq!(
            exercise.question().question_type(),
            QuestionType::TrueFalseNotGiven
        );
        assert!(exercise.question().is_evidence(1));
    }
}
