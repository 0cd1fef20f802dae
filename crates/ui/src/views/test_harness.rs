use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::QuestionRecord;
use quiz_core::time::fixed_clock;
use services::{AppServices, QuizLoopService, QuizSession};
use storage::repository::InMemoryQuestionSource;

use crate::context::{UiApp, build_app_context};
use crate::views::QuizScreenView;
use crate::vm::QuizVm;

struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Props, Clone)]
struct QuizHarnessProps {
    app: Arc<dyn UiApp>,
    seed: Rc<RefCell<Option<QuizVm>>>,
}

impl PartialEq for QuizHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarness(props: QuizHarnessProps) -> Element {
    let app = Arc::clone(&props.app);
    use_context_provider(|| build_app_context(&app));
    let seed = Rc::clone(&props.seed);
    let vm = use_signal(move || seed.borrow_mut().take().unwrap_or_default());
    rsx! {
        QuizScreenView { vm }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Services over an in-memory source with one question per raga.
pub fn quiz_services(ragas: &[&str]) -> AppServices {
    let rows = ragas
        .iter()
        .map(|raga| QuestionRecord::new(*raga, "S R G M P", "Sa Re Ga;Ma Pa").expect("row"))
        .collect();
    AppServices::with_source(
        Arc::new(InMemoryQuestionSource::new(rows)),
        Duration::from_secs(60),
        fixed_clock(),
    )
}

/// A view-model that has logged in as `group` with a seeded session.
pub async fn logged_in_vm(services: &AppServices, group: &str, seed: u64) -> QuizVm {
    let mut vm = QuizVm::from_session(QuizSession::with_seed(seed));
    let mut session = vm.take_session().expect("no login in flight");
    let result = services.quiz_loop().submit_group(&mut session, group).await;
    vm.finish_login(session, result);
    vm
}

pub fn setup_view_harness(services: &AppServices, vm: QuizVm) -> ViewHarness {
    let app: Arc<dyn UiApp> = Arc::new(TestApp {
        quiz_loop: services.quiz_loop(),
    });
    let dom = VirtualDom::new_with_props(
        QuizHarness,
        QuizHarnessProps {
            app,
            seed: Rc::new(RefCell::new(Some(vm))),
        },
    );
    let mut harness = ViewHarness { dom };
    harness.rebuild();
    harness
}
