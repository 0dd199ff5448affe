//! Quick Sums - a timed mental-arithmetic quiz
//!
//! Core modules:
//! - `sim`: Deterministic quiz core (question generation, countdown, game state machine)
//! - `platform`: Real-time clock for hosts without their own frame loop
//! - `settings`: Tunable time limits and progression rules
//! - `error`: Error types surfaced to the presentation layer

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{QuizError, SettingsError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Seconds allowed per question on level 1
    pub const LEVEL_ONE_SECONDS: u32 = 20;
    /// Seconds allowed per question on level 2
    pub const LEVEL_TWO_SECONDS: u32 = 15;
    /// Seconds allowed per question on level 3
    pub const LEVEL_THREE_SECONDS: u32 = 10;

    /// Correct answers needed on a level before moving up
    pub const ANSWERS_PER_LEVEL: u32 = 5;
    /// Mistakes (wrong answers or expiries) that end the game
    pub const MAX_MISTAKES: u32 = 3;

    /// Countdown granularity in seconds
    pub const TICK_SECONDS: u32 = 1;

    /// Text recorded when a round expires without a submission
    pub const NO_ANSWER: &str = "no answer";
}
