use dioxus::prelude::*;
use tracing::debug;

use crate::context::AppContext;
use crate::vm::QuizVm;

#[component]
pub fn LoginView(vm: Signal<QuizVm>, pending: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let mut group = use_signal(String::new);
    let can_submit = !pending && !group.read().trim().is_empty();

    let submit = move |_: MouseEvent| {
        let mut vm = vm;
        // Taken before spawning so a second click sees the login in flight.
        let Some(mut session) = vm.write().take_session() else {
            return;
        };
        let quiz_loop = ctx.quiz_loop();
        let name = group.read().clone();
        spawn(async move {
            let result = quiz_loop.submit_group(&mut session, &name).await;
            debug!(started = matches!(result, Ok(true)), "login finished");
            // Always hand the session back so the screen stays usable after errors.
            vm.write().finish_login(session, result);
        });
    };

    rsx! {
        section { class: "card login-card",
            h2 { "Enter your group name" }
            input {
                class: "login-card__input",
                id: "group-name",
                r#type: "text",
                placeholder: "Group name",
                value: "{group}",
                disabled: pending,
                oninput: move |evt| group.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !can_submit,
                onclick: submit,
                if pending { "Loading questions..." } else { "Start" }
            }
        }
    }
}
