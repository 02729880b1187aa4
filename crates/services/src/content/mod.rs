//! Exercise sources.
//!
//! A `ContentProvider` hands back a fully validated `Exercise` or a typed
//! failure. Parsing and shape checks happen here, at the boundary; nothing
//! downstream re-validates.

mod generative;
mod sample;
mod wire;

use async_trait::async_trait;
use rand::Rng;

use ielts_core::model::{Exercise, QuestionType};

use crate::error::ContentError;

pub use generative::{GenerativeConfig, GenerativeContentProvider, exercise_prompt};
pub use sample::SampleContentProvider;
pub use wire::parse_exercise;

#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Produce one exercise, preferably with a question of type `hint`.
    async fn generate_exercise(
        &self,
        hint: Option<QuestionType>,
    ) -> Result<Exercise, ContentError>;
}

/// Pick one of the question types uniformly at random.
#[must_use]
pub fn random_question_type() -> QuestionType {
    let mut rng = rand::rng();
    QuestionType::ALL[rng.random_range(0..QuestionType::ALL.len())]
}
