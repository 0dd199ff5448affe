//! Deterministic quiz core
//!
//! All game rules live here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time arrives as explicit clock events, never read from the wall clock
//! - No rendering or platform dependencies

pub mod clock;
pub mod events;
pub mod game;
pub mod question;
pub mod rng;
pub mod state;

pub use clock::{ClockEvent, ClockSignal, Countdown, ManualClock, RoundId, SessionClock};
pub use events::{GameEvent, Presenter};
pub use game::{QuizGame, Round, RoundOutcome};
pub use question::{
    Comparator, Comparison, Expression, Level, Question, QuestionKind, generate_boolean,
    generate_numeric, generate_question, roll_numeric,
};
pub use rng::{RandomSource, RngState, SeededRng};
pub use state::{GamePhase, GameState, GivenAnswer, WrongAnswerRecord, game_over_summary};
