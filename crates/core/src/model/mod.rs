mod phase;
mod question;

pub use phase::Phase;
pub use question::{CLUE_SEPARATOR, QuestionError, QuestionRecord};
