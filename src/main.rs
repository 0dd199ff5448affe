//! Quick Sums entry point
//!
//! Terminal front end: reads answers from stdin and renders game events.
//! Stdin lines and countdown ticks share one tokio channel so the game
//! handles a single event at a time.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc::{self, UnboundedSender};

use quick_sums::platform::TokioClock;
use quick_sums::sim::{
    ClockEvent, Level, Presenter, Question, QuestionKind, QuizGame, RandomSource, RoundOutcome,
    SeededRng, SessionClock, WrongAnswerRecord, game_over_summary,
};
use quick_sums::{QuizError, Settings};

/// Everything the main loop reacts to
#[derive(Debug)]
enum Input {
    Line(String),
    Clock(ClockEvent),
    /// Stdin closed
    Eof,
}

impl From<ClockEvent> for Input {
    fn from(event: ClockEvent) -> Self {
        Input::Clock(event)
    }
}

/// Renders game events as plain text
struct Terminal {
    max_mistakes: u32,
}

impl Presenter for Terminal {
    fn on_question_changed(&mut self, question: &Question) {
        println!();
        println!("{}", question.text());
        if question.kind() == QuestionKind::BooleanTruth {
            println!("  [y]es / [n]o");
        }
    }

    fn on_stats_changed(&mut self, level: Level, correct_answers: u32, mistakes: u32) {
        println!(
            "Level: {level}  Correct: {correct_answers}  Mistakes: {mistakes}/{}",
            self.max_mistakes
        );
    }

    fn on_tick(&mut self, seconds_remaining: u32) {
        // Only milestones, so typing isn't drowned out
        if seconds_remaining <= 3 || seconds_remaining % 5 == 0 {
            println!("  Time: {seconds_remaining}");
        }
    }

    fn on_timer_cleared(&mut self) {
        println!("  Time: -");
    }

    fn on_answer_feedback(&mut self, message: &str, correct_answer: Option<&str>) {
        match correct_answer {
            Some(answer) => println!("{message} Correct answer: {answer}"),
            None => println!("{message}"),
        }
    }

    fn on_level_up(&mut self, level: Level) {
        println!("*** New level: {level} ***");
    }

    fn on_game_over(&mut self, correct_answers: u32, wrong_answers: &[WrongAnswerRecord]) {
        println!();
        println!("Game over");
        println!("{}", game_over_summary(correct_answers, wrong_answers));
        println!();
        println!("Type r to play again or q to quit.");
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Blocking stdin reads stay on their own OS thread so they never hold up
/// runtime shutdown
fn spawn_stdin_reader(tx: UnboundedSender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Input::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    log::warn!("Failed to read stdin: {e}");
                    break;
                }
            }
        }
        let _ = tx.send(Input::Eof);
    });
}

fn handle_line<R: RandomSource, C: SessionClock>(
    game: &mut QuizGame<R, C>,
    line: &str,
) -> Result<Flow, QuizError> {
    let outcome = match line.trim().to_lowercase().as_str() {
        "q" | "quit" => return Ok(Flow::Quit),
        "r" | "restart" => {
            game.start_new_game();
            return Ok(Flow::Continue);
        }
        "y" | "yes" => game.submit_boolean_answer(true)?,
        "n" | "no" => game.submit_boolean_answer(false)?,
        _ => game.submit_numeric_answer(line)?,
    };
    log::debug!("Round resolved: {outcome:?}");
    if outcome == RoundOutcome::GameOver {
        log::info!("Final score: {}", game.state().correct_answers);
    }
    Ok(Flow::Continue)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    log::info!("Quick Sums starting...");

    let settings = Settings::load();
    let rng = settings
        .seed
        .map(SeededRng::new)
        .unwrap_or_else(SeededRng::from_entropy);
    log::info!("Game initialized with seed: {}", rng.seed());

    let (tx, mut rx) = mpsc::unbounded_channel::<Input>();
    spawn_stdin_reader(tx.clone());

    let mut terminal = Terminal {
        max_mistakes: settings.max_mistakes,
    };
    let mut game = QuizGame::new(settings, rng, TokioClock::new(tx));

    println!(
        "Quick Sums - answer before the timer runs out. {} mistakes and it's over.",
        game.settings().max_mistakes
    );
    println!("Commands: a number, y/n, r (restart), q (quit)");
    game.dispatch(&mut terminal);

    while let Some(input) = rx.recv().await {
        match input {
            Input::Clock(event) => {
                game.handle_clock_event(event);
            }
            Input::Line(line) if line.trim().is_empty() && game.state().is_game_over() => {}
            Input::Line(line) => match handle_line(&mut game, &line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(QuizError::NotAwaitingAnswer) => {
                    println!("Game over - type r to play again.");
                }
                Err(e) if e.is_recoverable() => println!("{e}"),
                Err(e) => {
                    log::error!("Fatal: {e}");
                    std::process::exit(1);
                }
            },
            Input::Eof => break,
        }
        game.dispatch(&mut terminal);
    }

    log::info!("Quick Sums exiting");
}
