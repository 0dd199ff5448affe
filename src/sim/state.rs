//! Game state and score-keeping types
//!
//! Everything the presentation layer may display about a session lives here.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::question::{Level, yes_no};
use crate::consts::NO_ANSWER;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// A question is live and waiting for an answer
    Active,
    /// Mistake limit reached; only a new game is accepted
    GameOver,
}

/// What the player answered in the last round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GivenAnswer {
    Number(i32),
    YesNo(bool),
    /// Time ran out before a submission
    #[default]
    NoAnswer,
}

impl fmt::Display for GivenAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GivenAnswer::Number(n) => write!(f, "{n}"),
            GivenAnswer::YesNo(b) => f.write_str(yes_no(*b)),
            GivenAnswer::NoAnswer => f.write_str(NO_ANSWER),
        }
    }
}

/// Snapshot of a missed or expired round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswerRecord {
    pub question: String,
    pub given: GivenAnswer,
    pub correct_answer: String,
}

impl WrongAnswerRecord {
    /// The player's answer as text, or the "no answer" sentinel
    pub fn given_text(&self) -> String {
        self.given.to_string()
    }
}

impl fmt::Display for WrongAnswerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Question: {}", self.question)?;
        writeln!(f, "Your answer: {}", self.given)?;
        write!(f, "Correct answer: {}", self.correct_answer)
    }
}

/// Complete score-keeping state for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Difficulty tier, never decreases within a game
    pub level: Level,
    /// Total correct answers
    pub correct_answers: u32,
    /// Wrong answers plus expiries
    pub mistakes: u32,
    /// Correct answers since the last level-up
    pub questions_on_current_level: u32,
    /// Missed rounds in chronological order
    pub wrong_answers: Vec<WrongAnswerRecord>,
    /// Last thing the player submitted
    pub last_answer: GivenAnswer,
    pub phase: GamePhase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            level: Level::One,
            correct_answers: 0,
            mistakes: 0,
            questions_on_current_level: 0,
            wrong_answers: Vec::new(),
            last_answer: GivenAnswer::NoAnswer,
            phase: GamePhase::Active,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Final report: mistakes, score, then every missed round
    pub fn summary(&self) -> String {
        game_over_summary(self.correct_answers, &self.wrong_answers)
    }
}

/// Render the end-of-game report from the score and the mistake log
pub fn game_over_summary(correct_answers: u32, wrong_answers: &[WrongAnswerRecord]) -> String {
    let mut out = format!(
        "You made {} mistakes. Correct answers: {correct_answers}",
        wrong_answers.len()
    );
    if !wrong_answers.is_empty() {
        out.push_str("\n\nWrong answers:");
        for record in wrong_answers {
            out.push_str("\n\n");
            out.push_str(&record.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert_eq!(state.level, Level::One);
        assert_eq!(state.correct_answers, 0);
        assert_eq!(state.mistakes, 0);
        assert_eq!(state.questions_on_current_level, 0);
        assert!(state.wrong_answers.is_empty());
        assert_eq!(state.phase, GamePhase::Active);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_given_answer_text() {
        assert_eq!(GivenAnswer::Number(-4).to_string(), "-4");
        assert_eq!(GivenAnswer::YesNo(true).to_string(), "yes");
        assert_eq!(GivenAnswer::YesNo(false).to_string(), "no");
        assert_eq!(GivenAnswer::NoAnswer.to_string(), NO_ANSWER);
    }

    #[test]
    fn test_summary_lists_records_in_order() {
        let mut state = GameState::new();
        state.mistakes = 2;
        state.correct_answers = 4;
        state.wrong_answers.push(WrongAnswerRecord {
            question: "2 + 2 = ?".into(),
            given: GivenAnswer::Number(5),
            correct_answer: "4".into(),
        });
        state.wrong_answers.push(WrongAnswerRecord {
            question: "3 < 1 ?".into(),
            given: GivenAnswer::NoAnswer,
            correct_answer: "no".into(),
        });

        let summary = state.summary();
        assert!(summary.starts_with("You made 2 mistakes. Correct answers: 4"));
        let first = summary.find("2 + 2 = ?").unwrap();
        let second = summary.find("3 < 1 ?").unwrap();
        assert!(first < second);
        assert!(summary.contains("Your answer: no answer"));
        assert!(summary.contains("Correct answer: no"));
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"level\":1"));
        assert!(json.contains("\"phase\":\"Active\""));
    }
}
