use std::env;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use ielts_core::model::{Exercise, QuestionType};

use super::{ContentProvider, parse_exercise, random_question_type};
use crate::error::ContentError;

#[derive(Clone, Debug)]
pub struct GenerativeConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GenerativeConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";

    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("IELTS_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("IELTS_AI_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.into());
        let model = env::var("IELTS_AI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Generates exercises through an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct GenerativeContentProvider {
    client: Client,
    config: Option<GenerativeConfig>,
}

impl GenerativeContentProvider {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GenerativeConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GenerativeConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    async fn complete(&self, prompt: String) -> Result<String, ContentError> {
        let config = self.config.as_ref().ok_or(ContentError::Disabled)?;

        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.7,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ContentError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ContentError::EmptyResponse)
    }
}

#[async_trait]
impl ContentProvider for GenerativeContentProvider {
    async fn generate_exercise(
        &self,
        hint: Option<QuestionType>,
    ) -> Result<Exercise, ContentError> {
        let question_type = hint.unwrap_or_else(random_question_type);
        let content = self.complete(exercise_prompt(question_type)).await?;
        debug!("generator returned {} bytes", content.len());
        parse_exercise(&content)
    }
}

/// Prompt asking for one passage and one question of `question_type` in the
/// JSON shape `parse_exercise` expects.
#[must_use]
pub fn exercise_prompt(question_type: QuestionType) -> String {
    format!(
        r#"Generate a professional IELTS Academic Reading passage of approximately 1000 words.
The passage should be formal, academic, and divided into 8-12 distinct paragraphs.
Then, generate ONE high-quality IELTS reading question of type: "{question_type}".
The question MUST have clear evidence in one or more specific paragraphs.

Return only a JSON object of this shape:
{{
  "passage": {{
    "title": "A Compelling Academic Title",
    "paragraphs": ["Paragraph 1 content...", "Paragraph 2 content...", "..."]
  }},
  "question": {{
    "type": "{question_type}",
    "questionText": "The specific question or statement to evaluate.",
    "correctParagraphIndices": [0],
    "explanation": "Why these paragraphs contain the answer, naming the keywords that locate it.",
    "answer": "The actual answer to the question (e.g. 'True', 'B', or the missing word)."
  }}
}}
"correctParagraphIndices" lists zero-based positions in "paragraphs" and must not be empty."#
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
