//! Quiz state machine
//!
//! `QuizGame` owns the score-keeping state, the random source, the countdown
//! and the live round. It handles one event at a time (a submission or a
//! clock notification) and queues `GameEvent`s for the presentation layer.
//!
//! Tie-break between a submission and an expiry for the same round: whichever
//! is handled first resolves the round. Resolving cancels the countdown and
//! bumps the `RoundId`, so a late notification no longer matches and is
//! dropped.

use super::clock::{ClockEvent, ClockSignal, ManualClock, RoundId, SessionClock};
use super::events::{GameEvent, Presenter};
use super::question::{Level, Question, QuestionKind, generate_question};
use super::rng::RandomSource;
use super::state::{GamePhase, GameState, GivenAnswer, WrongAnswerRecord};
use crate::error::QuizError;
use crate::settings::Settings;

const CORRECT_MESSAGE: &str = "Correct!";
const WRONG_MESSAGE: &str = "Wrong.";
const TIME_UP_MESSAGE: &str = "Time's up!";

const MISSING_ROUND: &str = "active game without a live round";

/// The question currently waiting for an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub id: RoundId,
    pub question: Question,
}

/// How a resolved round affected the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Correct,
    /// Correct, and it completed the current level
    LevelUp(Level),
    Incorrect,
    /// Incorrect, and it was the last allowed mistake
    GameOver,
}

/// One quiz session
#[derive(Debug)]
pub struct QuizGame<R, C> {
    settings: Settings,
    rng: R,
    clock: C,
    state: GameState,
    round: Option<Round>,
    last_round: RoundId,
    events: Vec<GameEvent>,
}

impl<R: RandomSource, C: SessionClock> QuizGame<R, C> {
    /// Create a session and start the first game
    pub fn new(settings: Settings, rng: R, clock: C) -> Self {
        let mut game = Self {
            settings,
            rng,
            clock,
            state: GameState::new(),
            round: None,
            last_round: RoundId::default(),
            events: Vec::new(),
        };
        game.start_new_game();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.round.as_ref().map(|r| &r.question)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Take all queued notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver all queued notifications to `presenter`
    pub fn dispatch<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        for event in self.drain_events() {
            event.apply_to(presenter);
        }
    }

    /// Reset everything and ask the first question. Allowed at any time.
    pub fn start_new_game(&mut self) {
        self.clock.cancel();
        self.state = GameState::new();
        self.round = None;
        log::info!("New game started");
        self.push_stats();
        self.begin_round();
    }

    /// Answer a numeric question with the player's raw text.
    ///
    /// Empty or non-integer text is rejected with `InvalidFormat` and the
    /// round continues untouched.
    pub fn submit_numeric_answer(&mut self, raw: &str) -> Result<RoundOutcome, QuizError> {
        let expected = match self.awaiting()? {
            Question::Numeric { answer, .. } => *answer,
            Question::BooleanTruth { .. } => {
                return Err(QuizError::InputModeMismatch {
                    expected: QuestionKind::BooleanTruth,
                });
            }
        };

        let trimmed = raw.trim();
        let value: i32 = trimmed.parse().map_err(|_| QuizError::InvalidFormat {
            input: trimmed.to_string(),
        })?;

        let round = self.take_round()?;
        self.clock.cancel();
        self.state.last_answer = GivenAnswer::Number(value);
        Ok(if value == expected {
            self.answer_correct(round)
        } else {
            self.answer_wrong(round, WRONG_MESSAGE)
        })
    }

    /// Answer a yes/no question
    pub fn submit_boolean_answer(&mut self, value: bool) -> Result<RoundOutcome, QuizError> {
        let expected = match self.awaiting()? {
            Question::BooleanTruth { answer, .. } => *answer,
            Question::Numeric { .. } => {
                return Err(QuizError::InputModeMismatch {
                    expected: QuestionKind::Numeric,
                });
            }
        };

        let round = self.take_round()?;
        self.clock.cancel();
        self.state.last_answer = GivenAnswer::YesNo(value);
        Ok(if value == expected {
            self.answer_correct(round)
        } else {
            self.answer_wrong(round, WRONG_MESSAGE)
        })
    }

    /// Time ran out on the live question; counts as a mistake
    pub fn expire_current_question(&mut self) -> Result<RoundOutcome, QuizError> {
        self.awaiting()?;
        let round = self.take_round()?;
        self.clock.cancel();
        self.state.last_answer = GivenAnswer::NoAnswer;
        self.events.push(GameEvent::Tick {
            seconds_remaining: 0,
        });
        Ok(self.answer_wrong(round, TIME_UP_MESSAGE))
    }

    /// Handle a notification from the session clock.
    ///
    /// Notifications for any round but the live one are dropped.
    pub fn handle_clock_event(&mut self, event: ClockEvent) -> Option<RoundOutcome> {
        let live = self.state.phase == GamePhase::Active
            && self.round.as_ref().is_some_and(|r| r.id == event.round);
        if !live {
            log::debug!(
                "Discarding {:?} for stale round {}",
                event.signal,
                event.round
            );
            return None;
        }

        match event.signal {
            ClockSignal::Tick { remaining } => {
                self.events.push(GameEvent::Tick {
                    seconds_remaining: remaining,
                });
                None
            }
            ClockSignal::Expired => self.expire_current_question().ok(),
        }
    }

    /// The live question, if one is waiting for an answer
    fn awaiting(&self) -> Result<&Question, QuizError> {
        if self.state.phase != GamePhase::Active {
            return Err(QuizError::NotAwaitingAnswer);
        }
        match &self.round {
            Some(round) => Ok(&round.question),
            None => {
                log::error!("{MISSING_ROUND}");
                Err(QuizError::InternalInvariantViolation(MISSING_ROUND))
            }
        }
    }

    fn take_round(&mut self) -> Result<Round, QuizError> {
        self.round.take().ok_or_else(|| {
            log::error!("{MISSING_ROUND}");
            QuizError::InternalInvariantViolation(MISSING_ROUND)
        })
    }

    fn answer_correct(&mut self, round: Round) -> RoundOutcome {
        log::debug!("Round {} answered correctly", round.id);
        self.state.correct_answers += 1;
        self.state.questions_on_current_level += 1;
        self.events.push(GameEvent::AnswerFeedback {
            message: CORRECT_MESSAGE.to_string(),
            correct_answer: None,
        });

        let mut outcome = RoundOutcome::Correct;
        if self.state.questions_on_current_level >= self.settings.answers_per_level {
            if let Some(next) = self.state.level.next() {
                self.state.level = next;
                self.state.questions_on_current_level = 0;
                log::info!("Level up: {next}");
                self.events.push(GameEvent::LevelUp { level: next });
                outcome = RoundOutcome::LevelUp(next);
            }
        }

        self.push_stats();
        self.begin_round();
        outcome
    }

    fn answer_wrong(&mut self, round: Round, message: &str) -> RoundOutcome {
        log::debug!("Round {} missed ({message})", round.id);
        self.state.mistakes += 1;
        let correct_answer = round.question.correct_answer_text();
        self.state.wrong_answers.push(WrongAnswerRecord {
            question: round.question.text().to_string(),
            given: self.state.last_answer,
            correct_answer: correct_answer.clone(),
        });
        self.events.push(GameEvent::AnswerFeedback {
            message: message.to_string(),
            correct_answer: Some(correct_answer),
        });
        self.push_stats();

        if self.state.mistakes >= self.settings.max_mistakes {
            self.finish();
            RoundOutcome::GameOver
        } else {
            self.begin_round();
            RoundOutcome::Incorrect
        }
    }

    fn finish(&mut self) {
        self.clock.cancel();
        self.round = None;
        self.state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: {} correct, {} mistakes",
            self.state.correct_answers,
            self.state.mistakes
        );
        self.events.push(GameEvent::TimerCleared);
        self.events.push(GameEvent::GameOver {
            correct_answers: self.state.correct_answers,
            wrong_answers: self.state.wrong_answers.clone(),
        });
    }

    fn begin_round(&mut self) {
        let level = self.state.level;
        let question = generate_question(level, &mut self.rng);
        let id = self.last_round.next();
        self.last_round = id;
        let seconds = self.settings.time_limit(level);
        log::debug!(
            "Round {id}: level {level}, {seconds}s, {} question",
            question.kind()
        );

        self.events.push(GameEvent::QuestionChanged {
            round: id,
            question: question.clone(),
        });
        self.round = Some(Round { id, question });
        self.clock.start(id, seconds);
        self.events.push(GameEvent::Tick {
            seconds_remaining: seconds,
        });
    }

    fn push_stats(&mut self) {
        self.events.push(GameEvent::StatsChanged {
            level: self.state.level,
            correct_answers: self.state.correct_answers,
            mistakes: self.state.mistakes,
        });
    }
}

impl<R: RandomSource> QuizGame<R, ManualClock> {
    /// Let `seconds` elapse on the manual clock, handling each notification
    pub fn advance_clock(&mut self, seconds: u32) -> Vec<RoundOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..seconds {
            if let Some(event) = self.clock.advance_second() {
                outcomes.extend(self.handle_clock_event(event));
            }
        }
        outcomes
    }
}
