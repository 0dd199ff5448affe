//! Notifications from the game to the presentation layer

use serde::Serialize;

use super::clock::RoundId;
use super::question::{Level, Question};
use super::state::WrongAnswerRecord;

/// Something the presentation layer should reflect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// New question; `question.kind()` selects the input mode
    QuestionChanged { round: RoundId, question: Question },
    StatsChanged {
        level: Level,
        correct_answers: u32,
        mistakes: u32,
    },
    Tick { seconds_remaining: u32 },
    TimerCleared,
    /// `correct_answer` is set after a wrong or expired round
    AnswerFeedback {
        message: String,
        correct_answer: Option<String>,
    },
    LevelUp { level: Level },
    GameOver {
        correct_answers: u32,
        wrong_answers: Vec<WrongAnswerRecord>,
    },
}

impl GameEvent {
    /// Route this event to the matching presenter callback
    pub fn apply_to<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            GameEvent::QuestionChanged { question, .. } => presenter.on_question_changed(question),
            GameEvent::StatsChanged {
                level,
                correct_answers,
                mistakes,
            } => presenter.on_stats_changed(*level, *correct_answers, *mistakes),
            GameEvent::Tick { seconds_remaining } => presenter.on_tick(*seconds_remaining),
            GameEvent::TimerCleared => presenter.on_timer_cleared(),
            GameEvent::AnswerFeedback {
                message,
                correct_answer,
            } => presenter.on_answer_feedback(message, correct_answer.as_deref()),
            GameEvent::LevelUp { level } => presenter.on_level_up(*level),
            GameEvent::GameOver {
                correct_answers,
                wrong_answers,
            } => presenter.on_game_over(*correct_answers, wrong_answers),
        }
    }
}

/// Callbacks a front end implements to render the game
pub trait Presenter {
    fn on_question_changed(&mut self, question: &Question);

    fn on_stats_changed(&mut self, level: Level, correct_answers: u32, mistakes: u32);

    fn on_tick(&mut self, _seconds_remaining: u32) {}

    fn on_timer_cleared(&mut self) {}

    fn on_answer_feedback(&mut self, message: &str, correct_answer: Option<&str>);

    fn on_level_up(&mut self, _level: Level) {}

    fn on_game_over(&mut self, correct_answers: u32, wrong_answers: &[WrongAnswerRecord]);
}
