use crate::study::StudyCard;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};

/// Typing this (after trim + lowercase) ends the session early.
pub const QUIT_SENTINEL: &str = "q";

/// Collaborator interface the engine quizzes through. The terminal shell
/// implements it over stdin/stdout; tests script it.
pub trait AnswerPort {
    /// Present a question and block for one line of learner input.
    fn prompt(&mut self, question: &str) -> String;
    /// Emit feedback or progress text.
    fn notify(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    /// Length of the full working order, even when the learner quit early.
    pub total: usize,
    pub correct: usize,
    /// Mistakes never recovered during re-drilling, in the order they were made.
    pub incorrect: Vec<StudyCard>,
    pub elapsed: Duration,
}

impl SessionResult {
    /// Percentage of the working order answered correctly. 0 for an empty
    /// session rather than a division by zero.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, PartialEq)]
enum Verdict {
    Correct,
    Incorrect,
    Quit,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

// Correctness is checked before the quit sentinel, so a card whose answer
// is literally "q" stays answerable.
fn check(answer: &str, expected: &str) -> Verdict {
    let answer = normalize(answer);
    if answer == normalize(expected) {
        Verdict::Correct
    } else if answer == QUIT_SENTINEL {
        Verdict::Quit
    } else {
        Verdict::Incorrect
    }
}

/// One run of the quiz loop. Owns its shuffled working order and counters
/// exclusively; a fresh `Session` is built per run.
#[derive(Debug)]
pub struct Session {
    /// Shuffled permutation of the study cards passed to `new`.
    pub working_order: Vec<StudyCard>,
    started_at: Instant,
    correct: usize,
    incorrect: Vec<StudyCard>,
}

impl Session {
    /// Shuffle `cards` into the working order with the supplied RNG and
    /// start the clock. Seed the RNG for deterministic tests.
    pub fn new<R: Rng + ?Sized>(mut cards: Vec<StudyCard>, rng: &mut R) -> Self {
        cards.shuffle(rng);
        Self {
            working_order: cards,
            started_at: Instant::now(),
            correct: 0,
            incorrect: Vec::new(),
        }
    }

    /// Run the quiz loop to completion (or early quit) and produce the result.
    pub fn run(mut self, port: &mut dyn AnswerPort) -> SessionResult {
        let working = std::mem::take(&mut self.working_order);
        let total = working.len();

        for (i, card) in working.iter().enumerate() {
            port.notify(&format!("Card {}/{}", i + 1, total));
            let answer = port.prompt(&card.question);

            match check(&answer, &card.answer) {
                Verdict::Correct => {
                    self.correct += 1;
                    port.notify(&format!("Correct! {} = {}", card.question, card.answer));
                }
                Verdict::Quit => break,
                Verdict::Incorrect => {
                    port.notify(&format!(
                        "Wrong! Expected: {}. You typed: {}",
                        card.answer,
                        answer.trim()
                    ));
                    self.incorrect.push(card.clone());
                }
            }

            if !self.redrill(port) {
                break;
            }
        }

        SessionResult {
            total,
            correct: self.correct,
            incorrect: self.incorrect,
            elapsed: self.started_at.elapsed(),
        }
    }

    /// Re-prompt the entire accumulated mistake queue once. A recovered card
    /// counts toward the score and leaves the queue, so every card is scored
    /// at most once. Returns false when the learner quit mid-drill.
    fn redrill(&mut self, port: &mut dyn AnswerPort) -> bool {
        if self.incorrect.is_empty() {
            return true;
        }

        port.notify("--- reviewing mistakes ---");

        let queue = std::mem::take(&mut self.incorrect);
        let mut remaining = Vec::new();
        let mut quit = false;

        for card in queue {
            if quit {
                remaining.push(card);
                continue;
            }

            let answer = port.prompt(&card.question);
            match check(&answer, &card.answer) {
                Verdict::Correct => {
                    self.correct += 1;
                    port.notify(&format!("Correct! {} = {}", card.question, card.answer));
                }
                Verdict::Quit => {
                    quit = true;
                    remaining.push(card);
                }
                Verdict::Incorrect => {
                    port.notify(&format!("Still wrong! Expected: {}", card.answer));
                    remaining.push(card);
                }
            }
        }

        self.incorrect = remaining;
        !quit
    }
}
