mod quiz_vm;

pub use quiz_vm::{Notice, QuizScreen, QuizVm};
