mod game_over;
mod login;
mod playing;
mod quiz;
mod state;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use game_over::GameOverView;
pub use login::LoginView;
pub use playing::PlayingView;
pub use quiz::{QuizScreenView, QuizView};
pub use state::ViewError;
