use dioxus::prelude::*;

use services::QuizSnapshot;

use crate::vm::QuizVm;

#[component]
pub fn GameOverView(mut vm: Signal<QuizVm>, snapshot: QuizSnapshot) -> Element {
    let answered = snapshot
        .question_number
        .saturating_sub(1)
        .min(snapshot.total_questions);

    rsx! {
        section { class: "card game-over-card",
            h2 { "🏆 Challenge Complete!" }
            p { class: "game-over-card__score",
                "{snapshot.group}, your final score is {snapshot.score}"
            }
            p { class: "game-over-card__detail",
                "Questions played: {answered} of {snapshot.total_questions}"
            }
            p { class: "game-over-card__hint", "Show this screen to the host for the leaderboard!" }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| vm.write().restart(),
                "Restart"
            }
        }
    }
}
