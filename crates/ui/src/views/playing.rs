use dioxus::prelude::*;

use services::{HintView, QuestionView, QuizSnapshot};

use crate::vm::QuizVm;

fn hearts(lives: u32, max_lives: u32) -> String {
    let lost = max_lives.saturating_sub(lives);
    format!(
        "{}{}",
        "❤️".repeat(lives as usize),
        "🖤".repeat(lost as usize)
    )
}

#[component]
pub fn PlayingView(mut vm: Signal<QuizVm>, snapshot: QuizSnapshot, question: QuestionView) -> Element {
    let mut selected = use_signal(|| None::<String>);
    let hearts = hearts(snapshot.lives, snapshot.max_lives);
    let current = selected.read().clone();
    let has_choice = current.is_some();

    rsx! {
        section { class: "card playing-card",
            div { class: "status-bar",
                span { class: "status-bar__team", "Team: {snapshot.group}" }
                span { class: "status-bar__score", "Score: {snapshot.score}" }
                span { class: "status-bar__lives", title: "Lives", "{hearts}" }
            }
            p { class: "question-progress", "{question.number} / {snapshot.total_questions}" }
            h3 { class: "question-title",
                "Question {question.number}: Listen to the song and identify the Raga."
            }

            match question.hint.clone() {
                Some(hint) => rsx! {
                    NotationBox { hint }
                },
                None => rsx! {
                    button {
                        class: "btn btn-secondary hint-btn",
                        r#type: "button",
                        onclick: move |_| vm.write().activate_hint(),
                        "✨ Activate AI Notation Analysis"
                    }
                },
            }

            fieldset { class: "options",
                legend { "Which Raga is this?" }
                for option in question.options.iter().cloned() {
                    OptionRow {
                        key: "{option}",
                        checked: current.as_deref() == Some(option.as_str()),
                        option: option.clone(),
                        onselect: move |choice: String| selected.set(Some(choice)),
                    }
                }
            }

            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !has_choice,
                onclick: move |_| {
                    let choice = selected.read().clone();
                    if let Some(choice) = choice {
                        vm.write().submit_answer(&choice);
                    }
                },
                "Submit Answer"
            }
        }
    }
}

#[component]
fn OptionRow(option: String, checked: bool, onselect: EventHandler<String>) -> Element {
    let value = option.clone();
    let class = if checked { "option option--checked" } else { "option" };

    rsx! {
        label { class: "{class}",
            input {
                r#type: "radio",
                name: "raga-option",
                value: "{option}",
                checked,
                onchange: move |_| onselect.call(value.clone()),
            }
            span { "{option}" }
        }
    }
}

#[component]
fn NotationBox(hint: HintView) -> Element {
    let swaras: Vec<String> = hint.notation.split_whitespace().map(str::to_owned).collect();

    rsx! {
        div { class: "notation-box",
            p { class: "notation-box__label", "AI notation analysis" }
            div { class: "notation-box__swaras",
                for (idx, swara) in swaras.into_iter().enumerate() {
                    span { key: "{idx}", class: "swara", "{swara}" }
                }
            }
            if let Some(clue) = hint.clue {
                p { class: "notation-box__clue", "Clue: {clue}" }
            }
        }
    }
}
