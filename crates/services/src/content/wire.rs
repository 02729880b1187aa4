use serde::Deserialize;
use serde_json::Number;

use ielts_core::model::{Exercise, ExerciseDraft};

use crate::error::ContentError;

/// JSON shape requested from the generator.
#[derive(Debug, Deserialize)]
struct GeneratedExercise {
    passage: GeneratedPassage,
    question: GeneratedQuestion,
}

#[derive(Debug, Deserialize)]
struct GeneratedPassage {
    title: String,
    paragraphs: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestion {
    #[serde(rename = "type")]
    question_type: String,
    question_text: String,
    correct_paragraph_indices: Vec<Number>,
    explanation: String,
    answer: String,
}

/// Parse a generator response body into a validated exercise.
///
/// Accepts the JSON object bare or wrapped in a Markdown code fence. Evidence
/// indices may arrive as floats (`2.0`) as long as they are whole numbers.
///
/// # Errors
///
/// Returns `ContentError::EmptyResponse` for a blank body,
/// `ContentError::Malformed` when the JSON does not have the expected shape,
/// `ContentError::FractionalIndex` for indices like `1.5`, and
/// `ContentError::Invalid` when the exercise fails validation.
pub fn parse_exercise(raw: &str) -> Result<Exercise, ContentError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(ContentError::EmptyResponse);
    }

    let generated: GeneratedExercise = serde_json::from_str(body)?;
    let correct_paragraphs = generated
        .question
        .correct_paragraph_indices
        .iter()
        .map(whole_index)
        .collect::<Result<Vec<_>, _>>()?;

    let draft = ExerciseDraft {
        title: generated.passage.title,
        paragraphs: generated.passage.paragraphs,
        question_type: generated.question.question_type,
        question_text: generated.question.question_text,
        correct_paragraphs,
        explanation: generated.question.explanation,
        answer: generated.question.answer,
    };
    Ok(draft.validate()?)
}

// Whole numbers outside i64 (large u64s, 1e20) saturate to i64::MIN/MAX so
// validation reports them as out of range.
#[allow(clippy::cast_possible_truncation)]
fn whole_index(number: &Number) -> Result<i64, ContentError> {
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 => Ok(value as i64),
        _ => Err(ContentError::FractionalIndex(number.to_string())),
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ielts_core::model::{ExerciseError, QuestionType};

    const BODY: &str = r#"{
        "passage": {
            "title": "The Decline of Honeybees",
            "paragraphs": ["A first.", "B second.", "C third.", "D fourth."]
        },
        "question": {
            "type": "Heading Matching",
            "questionText": "Choose the heading for the paragraph on pesticides.",
            "correctParagraphIndices": [1, 3.0],
            "explanation": "Neonicotinoids are named in B and D.",
            "answer": "iv"
        }
    }"#;

    #[test]
    fn parses_well_formed_body() {
        let exercise = parse_exercise(BODY).unwrap();
        assert_eq!(exercise.passage().title(), "The Decline of Honeybees");
        assert_eq!(exercise.passage().paragraph_count(), 4);
        assert_eq!(
            exercise.question().question_type(),
            QuestionType::HeadingMatching
        );
        assert!(exercise.question().is_evidence(1));
        assert!(exercise.question().is_evidence(3));
        assert_eq!(exercise.question().answer(), "iv");
    }

    #[test]
    fn parses_fenced_body() {
        let fenced = format!("```json\n{BODY}\n```");
        assert!(parse_exercise(&fenced).is_ok());
    }

    #[test]
    fn rejects_blank_body() {
        assert!(matches!(parse_exercise("  \n"), Err(ContentError::EmptyResponse)));
        assert!(matches!(parse_exercise("```json\n```"), Err(ContentError::EmptyResponse)));
    }

    #[test]
    fn rejects_missing_fields() {
        let body = r#"{"passage": {"title": "T", "paragraphs": ["a"]}}"#;
        assert!(matches!(parse_exercise(body), Err(ContentError::Malformed(_))));
    }

    #[test]
    fn rejects_fractional_index() {
        let body = BODY.replace("[1, 3.0]", "[1.5]");
        assert!(matches!(
            parse_exercise(&body),
            Err(ContentError::FractionalIndex(_))
        ));
    }

    #[test]
    fn huge_whole_index_is_out_of_range_not_fractional() {
        for huge in ["18446744073709551615", "1e20"] {
            let body = BODY.replace("[1, 3.0]", &format!("[{huge}]"));
            assert!(
                matches!(
                    parse_exercise(&body),
                    Err(ContentError::Invalid(ExerciseError::ParagraphOutOfRange {
                        index: i64::MAX,
                        count: 4
                    }))
                ),
                "{huge} should be out of range"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_index() {
        let body = BODY.replace("[1, 3.0]", "[4]");
        assert!(matches!(
            parse_exercise(&body),
            Err(ContentError::Invalid(ExerciseError::ParagraphOutOfRange { index: 4, count: 4 }))
        ));
    }
}
