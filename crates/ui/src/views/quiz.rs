use dioxus::prelude::*;

use crate::views::{GameOverView, LoginView, PlayingView};
use crate::vm::{Notice, QuizScreen, QuizVm};

#[component]
pub fn QuizView() -> Element {
    let vm = use_signal(QuizVm::new);
    rsx! {
        QuizScreenView { vm }
    }
}

/// Header, feedback banner and the screen for the current phase.
#[component]
pub fn QuizScreenView(vm: Signal<QuizVm>) -> Element {
    let screen = vm.read().screen().clone();
    let notice = vm.read().notice().cloned();

    rsx! {
        div { class: "page quiz-page",
            header { class: "quiz-header",
                h1 { class: "quiz-header__title", "🎵 Raga AI Workshop" }
            }
            if let Some(notice) = notice {
                NoticeBanner { notice }
            }
            match screen {
                QuizScreen::Login { pending } => rsx! {
                    LoginView { vm, pending }
                },
                QuizScreen::Playing { snapshot, question } => rsx! {
                    PlayingView {
                        key: "{question.number}",
                        vm,
                        snapshot,
                        question,
                    }
                },
                QuizScreen::GameOver { snapshot } => rsx! {
                    GameOverView { vm, snapshot }
                },
            }
        }
    }
}

#[component]
fn NoticeBanner(notice: Notice) -> Element {
    let tone = if notice.is_positive() {
        "notice notice--success"
    } else {
        "notice notice--warning"
    };
    let message = notice.message();

    rsx! {
        div { class: "{tone}", role: "status", "{message}" }
    }
}
