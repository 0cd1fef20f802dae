use super::test_harness::{logged_in_vm, quiz_services, setup_view_harness};
use crate::vm::QuizVm;

const RAGAS: [&str; 5] = ["Yaman", "Bhairav", "Kafi", "Durga", "Bhupali"];

fn current_raga(vm: &QuizVm) -> String {
    vm.session()
        .current_question()
        .expect("playing")
        .raga()
        .to_owned()
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_group_form() {
    let harness = setup_view_harness(&quiz_services(&RAGAS), QuizVm::new());
    let html = harness.render();
    assert!(html.contains("Enter your group name"), "missing heading in {html}");
    assert!(html.contains("group-name"), "missing input in {html}");
    assert!(html.contains("Start"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn playing_view_smoke_renders_status_question_and_options() {
    let services = quiz_services(&RAGAS);
    let vm = logged_in_vm(&services, "Alpha", 11).await;
    let harness = setup_view_harness(&services, vm);
    let html = harness.render();

    assert!(html.contains("Team: Alpha"), "missing team in {html}");
    assert!(html.contains("Score: 0"), "missing score in {html}");
    assert!(html.contains(&"❤️".repeat(3)), "missing hearts in {html}");
    assert!(
        html.contains("Question 1: Listen to the song and identify the Raga."),
        "missing question heading in {html}"
    );
    assert!(
        html.contains("Activate AI Notation Analysis"),
        "missing hint button in {html}"
    );
    assert!(!html.contains("notation-box"), "hint shown too early in {html}");
    assert_eq!(html.matches("type=\"radio\"").count(), 4, "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn playing_view_smoke_renders_notation_box_after_hint() {
    let services = quiz_services(&RAGAS);
    let mut vm = logged_in_vm(&services, "Alpha", 12).await;
    vm.activate_hint();
    let harness = setup_view_harness(&services, vm);
    let html = harness.render();

    assert!(html.contains("notation-box"), "missing notation box in {html}");
    assert!(html.contains("swara"), "missing swaras in {html}");
    assert!(
        html.contains("Clue: Sa Re Ga") || html.contains("Clue: Ma Pa"),
        "missing clue in {html}"
    );
    assert!(
        !html.contains("Activate AI Notation Analysis"),
        "hint button still shown in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn wrong_answer_smoke_renders_feedback_and_lost_life() {
    let services = quiz_services(&RAGAS);
    let mut vm = logged_in_vm(&services, "Beta", 13).await;
    let expected = current_raga(&vm);
    vm.submit_answer("Not a raga");
    let harness = setup_view_harness(&services, vm);
    let html = harness.render();

    assert!(html.contains(&format!("It was {expected}.")), "missing feedback in {html}");
    assert!(html.contains("❤️❤️🖤"), "missing lost life in {html}");
    assert!(html.contains("Question 2:"), "missing next question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_over_view_smoke_renders_final_score() {
    let services = quiz_services(&RAGAS);
    let mut vm = logged_in_vm(&services, "Alpha", 14).await;
    let answer = current_raga(&vm);
    vm.submit_answer(&answer);
    for _ in 0..3 {
        vm.submit_answer("Not a raga");
    }
    let harness = setup_view_harness(&services, vm);
    let html = harness.render();

    assert!(html.contains("Challenge Complete!"), "missing title in {html}");
    assert!(
        html.contains("Alpha, your final score is 10"),
        "missing final score in {html}"
    );
    assert!(html.contains("Restart"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn too_few_ragas_smoke_renders_skip_notice_on_game_over() {
    let services = quiz_services(&["Yaman", "Bhairav"]);
    let vm = logged_in_vm(&services, "Gamma", 15).await;
    let harness = setup_view_harness(&services, vm);
    let html = harness.render();

    assert!(html.contains("Skipped a"), "missing skip notice in {html}");
    assert!(
        html.contains("Gamma, your final score is 0"),
        "missing final score in {html}"
    );
}
