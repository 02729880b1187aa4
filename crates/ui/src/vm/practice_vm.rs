use ielts_core::model::{Session, SessionStatus, paragraph_label};
use ielts_core::scoring::Verdict;

use super::timer_vm::{TimerVm, format_clock};

/// How a paragraph should be highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParagraphMark {
    Plain,
    Selected,
    /// Holds evidence; shown after submission.
    Evidence,
    /// Picked by the user but holds no evidence.
    WrongPick,
    /// Neither picked nor evidence, after submission.
    Faded,
}

impl ParagraphMark {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            ParagraphMark::Plain => "paragraph-plain",
            ParagraphMark::Selected => "paragraph-selected",
            ParagraphMark::Evidence => "paragraph-evidence",
            ParagraphMark::WrongPick => "paragraph-wrong",
            ParagraphMark::Faded => "paragraph-faded",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParagraphVm {
    pub index: usize,
    pub label: String,
    pub text: String,
    pub mark: ParagraphMark,
    /// Whether clicking toggles the selection.
    pub clickable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub type_label: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub correct: bool,
    pub headline: String,
    pub detail: String,
    pub answer: String,
    pub explanation: String,
    pub elapsed_label: String,
}

/// Everything the practice screen renders, derived from one session snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeVm {
    pub status: SessionStatus,
    pub timer: TimerVm,
    pub time_limit_label: String,
    pub title: String,
    pub word_count: usize,
    pub paragraphs: Vec<ParagraphVm>,
    pub question: Option<QuestionVm>,
    pub selected_label: String,
    pub can_submit: bool,
    pub result: Option<ResultVm>,
    pub error: Option<String>,
}

#[must_use]
pub fn map_practice(session: &Session) -> PracticeVm {
    let status = session.status();
    let remaining = session.time_remaining();
    let running = session.is_running();
    let selected = session.selected();

    let (title, word_count, paragraphs, question) = match session.exercise() {
        Some(exercise) => {
            let question = exercise.question();
            let paragraphs = exercise
                .passage()
                .paragraphs()
                .iter()
                .enumerate()
                .map(|(index, text)| ParagraphVm {
                    index,
                    label: paragraph_label(index),
                    text: text.clone(),
                    mark: paragraph_mark(
                        status,
                        selected.contains(&index),
                        question.is_evidence(index),
                    ),
                    clickable: running,
                })
                .collect();
            (
                exercise.passage().title().to_string(),
                exercise.passage().word_count(),
                paragraphs,
                Some(QuestionVm {
                    type_label: question.question_type().label().to_string(),
                    text: question.question_text().to_string(),
                }),
            )
        }
        None => (String::new(), 0, Vec::new(), None),
    };

    let result = match (session.verdict(), session.exercise()) {
        (Some(verdict), Some(exercise)) => Some(map_result(
            verdict,
            exercise.question().correct_paragraphs().iter().copied(),
            exercise.question().answer(),
            exercise.question().explanation(),
            session.elapsed(),
        )),
        _ => None,
    };

    let count = selected.len();
    let selected_label = if count == 1 {
        "You have selected 1 paragraph.".to_string()
    } else {
        format!("You have selected {count} paragraphs.")
    };

    PracticeVm {
        status,
        timer: TimerVm::new(remaining),
        time_limit_label: format_clock(session.time_limit()),
        title,
        word_count,
        paragraphs,
        question,
        selected_label,
        can_submit: running && count > 0,
        result,
        error: session.error_message().map(str::to_string),
    }
}

fn paragraph_mark(status: SessionStatus, selected: bool, evidence: bool) -> ParagraphMark {
    if status == SessionStatus::Submitted {
        return match (evidence, selected) {
            (true, _) => ParagraphMark::Evidence,
            (false, true) => ParagraphMark::WrongPick,
            (false, false) => ParagraphMark::Faded,
        };
    }
    if selected {
        ParagraphMark::Selected
    } else {
        ParagraphMark::Plain
    }
}

fn map_result(
    verdict: &Verdict,
    evidence: impl Iterator<Item = usize>,
    answer: &str,
    explanation: &str,
    elapsed: u32,
) -> ResultVm {
    let headline = if verdict.timed_out() && !verdict.is_correct() {
        "Time's up!"
    } else if verdict.is_correct() {
        "Correct!"
    } else {
        "Incorrect"
    };
    let detail = if verdict.is_correct() {
        "Well done, you located the evidence.".to_string()
    } else {
        let labels = evidence.map(paragraph_label).collect::<Vec<_>>();
        format!("The evidence is in paragraph: {}", labels.join(", "))
    };

    ResultVm {
        correct: verdict.is_correct(),
        headline: headline.to_string(),
        detail,
        answer: answer.to_string(),
        explanation: explanation.to_string(),
        elapsed_label: format_clock(elapsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ielts_core::model::{Exercise, ExerciseDraft, INITIAL_TIME_SECS};

    fn exercise() -> Exercise {
        ExerciseDraft {
            title: "Glaciers".into(),
            paragraphs: vec![
                "Ice moves slowly.".into(),
                "Melt rates doubled.".into(),
                "Sea levels rise.".into(),
            ],
            question_type: "Gap Filling".into(),
            question_text: "Melt rates have ____ since 1990.".into(),
            correct_paragraphs: vec![1],
            explanation: "Paragraph B says melt rates doubled.".into(),
            answer: "doubled".into(),
        }
        .validate()
        .unwrap()
    }

    fn playing() -> Session {
        let mut session = Session::default();
        let epoch = session.begin_loading();
        session.finish_loading(epoch, exercise());
        session
    }

    #[test]
    fn loading_has_no_content() {
        let vm = map_practice(&Session::default());
        assert_eq!(vm.status, SessionStatus::Loading);
        assert!(vm.paragraphs.is_empty());
        assert!(vm.question.is_none());
        assert!(!vm.can_submit);
        assert_eq!(vm.timer.label, "01:30");
    }

    #[test]
    fn playing_marks_selection_and_enables_submit() {
        let mut session = playing();
        let vm = map_practice(&session);
        assert!(!vm.can_submit);
        assert!(vm.paragraphs.iter().all(|p| p.clickable));
        assert_eq!(vm.paragraphs[2].label, "C");

        session.toggle_paragraph(0);
        let vm = map_practice(&session);
        assert!(vm.can_submit);
        assert_eq!(vm.paragraphs[0].mark, ParagraphMark::Selected);
        assert_eq!(vm.paragraphs[1].mark, ParagraphMark::Plain);
        assert_eq!(vm.selected_label, "You have selected 1 paragraph.");
        assert_eq!(vm.question.unwrap().type_label, "Gap Filling");
    }

    #[test]
    fn submitted_marks_evidence_and_wrong_picks() {
        let mut session = playing();
        session.toggle_paragraph(0);
        session.submit();
        let vm = map_practice(&session);

        assert_eq!(vm.paragraphs[0].mark, ParagraphMark::WrongPick);
        assert_eq!(vm.paragraphs[1].mark, ParagraphMark::Evidence);
        assert_eq!(vm.paragraphs[2].mark, ParagraphMark::Faded);
        assert!(vm.paragraphs.iter().all(|p| !p.clickable));

        let result = vm.result.unwrap();
        assert!(!result.correct);
        assert_eq!(result.headline, "Incorrect");
        assert_eq!(result.detail, "The evidence is in paragraph: B");
        assert_eq!(result.answer, "doubled");
    }

    #[test]
    fn timed_out_wrong_answer_reads_times_up() {
        let mut session = playing();
        let epoch = session.epoch();
        for _ in 0..INITIAL_TIME_SECS {
            session.tick(epoch);
        }
        let vm = map_practice(&session);
        let result = vm.result.unwrap();
        assert_eq!(result.headline, "Time's up!");
        assert_eq!(result.elapsed_label, "01:30");
        assert_eq!(vm.timer.label, "00:00");
    }

    #[test]
    fn zero_time_limit_shows_result_straight_away() {
        let mut session = Session::new(0);
        let epoch = session.begin_loading();
        session.finish_loading(epoch, exercise());
        let vm = map_practice(&session);

        assert_eq!(vm.status, SessionStatus::Submitted);
        assert!(!vm.can_submit);
        assert_eq!(vm.result.unwrap().headline, "Time's up!");
    }

    #[test]
    fn correct_answer_reads_correct() {
        let mut session = playing();
        session.toggle_paragraph(1);
        session.submit();
        let result = map_practice(&session).result.unwrap();
        assert!(result.correct);
        assert_eq!(result.headline, "Correct!");
    }

    #[test]
    fn error_carries_message() {
        let mut session = Session::default();
        let epoch = session.begin_loading();
        session.fail_loading(epoch, "content generation is not configured");
        let vm = map_practice(&session);
        assert_eq!(vm.status, SessionStatus::Error);
        assert_eq!(
            vm.error.as_deref(),
            Some("content generation is not configured")
        );
    }
}
