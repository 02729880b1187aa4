use dioxus::prelude::*;
use ielts_core::model::SessionStatus;

use crate::context::AppContext;
use crate::vm::{ParagraphVm, PracticeVm, QuestionVm, ResultVm, TimerVm, map_practice};

#[component]
pub fn PracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = use_hook(|| ctx.new_controller());
    let session = use_signal(|| controller.snapshot());

    // Mirror every controller update into the signal.
    use_hook({
        let controller = controller.clone();
        move || {
            let mut updates = controller.subscribe();
            let mut session = session;
            spawn(async move {
                while updates.changed().await.is_ok() {
                    let next = updates.borrow_and_update().clone();
                    session.set(next);
                }
            })
        }
    });

    use_hook({
        let controller = controller.clone();
        move || {
            spawn(async move {
                controller.start_new_exercise().await;
            })
        }
    });

    use_drop({
        let controller = controller.clone();
        move || controller.shutdown()
    });

    let on_toggle = {
        let controller = controller.clone();
        use_callback(move |index: usize| {
            controller.toggle_paragraph(index);
        })
    };

    let on_submit = {
        let controller = controller.clone();
        use_callback(move |()| {
            controller.submit();
        })
    };

    let on_new_exercise = use_callback(move |()| {
        let controller = controller.clone();
        spawn(async move {
            controller.start_new_exercise().await;
        });
    });

    let vm = map_practice(&session.read());
    let error_message = vm.error.clone().unwrap_or_default();
    let show_timer = matches!(vm.status, SessionStatus::Playing | SessionStatus::Submitted);

    rsx! {
        div { class: "page practice-page",
            Navbar {
                timer: vm.timer.clone(),
                time_limit_label: vm.time_limit_label.clone(),
                show_timer,
                on_new_exercise,
            }
            match vm.status {
                SessionStatus::Loading => rsx! {
                    div { class: "state-panel state-loading",
                        div { class: "spinner" }
                        p { "Generating a new passage..." }
                    }
                },
                SessionStatus::Error => rsx! {
                    div { class: "state-panel state-error",
                        h2 { "Could not load an exercise" }
                        p { class: "error-message", "{error_message}" }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| on_new_exercise.call(()),
                            "Retry"
                        }
                    }
                },
                SessionStatus::Playing | SessionStatus::Submitted => rsx! {
                    ExerciseLayout { vm: vm.clone(), on_toggle, on_submit }
                },
            }
        }
    }
}

#[component]
fn Navbar(
    timer: TimerVm,
    time_limit_label: String,
    show_timer: bool,
    on_new_exercise: Callback<()>,
) -> Element {
    let tone = timer.tone.class();
    rsx! {
        header { class: "navbar",
            div { class: "navbar-brand",
                h1 { "IELTS Reading" }
                span { class: "navbar-subtitle", "Evidence locating practice" }
            }
            div { class: "navbar-actions",
                if show_timer {
                    div { class: "timer {tone}",
                        span { class: "timer-label", "{timer.label}" }
                        span { class: "timer-limit", " / {time_limit_label}" }
                    }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_new_exercise.call(()),
                    "New exercise"
                }
            }
        }
    }
}

#[component]
fn ExerciseLayout(vm: PracticeVm, on_toggle: Callback<usize>, on_submit: Callback<()>) -> Element {
    let playing = vm.status == SessionStatus::Playing;
    rsx! {
        main { class: "exercise-layout",
            section { class: "passage-panel",
                header { class: "passage-header",
                    h2 { class: "passage-title", "{vm.title}" }
                    span { class: "passage-meta", "{vm.word_count} words" }
                }
                for paragraph in vm.paragraphs.iter().cloned() {
                    ParagraphRow { key: "{paragraph.index}", paragraph, on_toggle }
                }
            }
            aside { class: "side-panel",
                if let Some(question) = vm.question.clone() {
                    QuestionCard { question }
                }
                if playing {
                    p { class: "selection-count", "{vm.selected_label}" }
                    button {
                        class: "btn btn-primary btn-submit",
                        r#type: "button",
                        disabled: !vm.can_submit,
                        onclick: move |_| on_submit.call(()),
                        "Submit"
                    }
                }
                if let Some(result) = vm.result.clone() {
                    ResultCard { result }
                }
                TipPanel {}
            }
        }
    }
}

#[component]
fn ParagraphRow(paragraph: ParagraphVm, on_toggle: Callback<usize>) -> Element {
    let index = paragraph.index;
    let clickable = paragraph.clickable;
    let mark = paragraph.mark.class();
    let interactive = if clickable { "paragraph-clickable" } else { "" };
    rsx! {
        div {
            class: "paragraph {mark} {interactive}",
            onclick: move |_| {
                if clickable {
                    on_toggle.call(index);
                }
            },
            span { class: "paragraph-label", "{paragraph.label}" }
            p { class: "paragraph-text", "{paragraph.text}" }
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm) -> Element {
    rsx! {
        div { class: "card question-card",
            span { class: "question-type", "{question.type_label}" }
            p { class: "question-text", "{question.text}" }
            p { class: "question-hint", "Click every paragraph that contains the evidence." }
        }
    }
}

#[component]
fn ResultCard(result: ResultVm) -> Element {
    let tone = if result.correct { "result-correct" } else { "result-incorrect" };
    rsx! {
        div { class: "card result-card {tone}",
            h3 { class: "result-headline", "{result.headline}" }
            p { class: "result-detail", "{result.detail}" }
            dl { class: "result-facts",
                dt { "Answer" }
                dd { "{result.answer}" }
                dt { "Time used" }
                dd { "{result.elapsed_label}" }
            }
            h4 { "Explanation" }
            p { class: "result-explanation", "{result.explanation}" }
        }
    }
}

#[component]
fn TipPanel() -> Element {
    rsx! {
        div { class: "card tip-panel",
            h4 { "Scanning tip" }
            p {
                "Underline the keywords in the question, then look for their synonyms "
                "and paraphrases in the passage rather than the exact words."
            }
        }
    }
}
