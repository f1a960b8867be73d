//! Ouija consultations.
//!
//! The user asks a question, the spirits answer from a weighted catalog,
//! and the planchette walks the board to spell the answer out. The walk is
//! a step sequence: a hold while the planchette stirs, one move per board
//! position, and a final hold before the reading completes.

use nyx_core::{Catalog, Category, DrawEntry, DrawResult, HistoryBuffer, RandomSource};
use serde::{Deserialize, Serialize};

use crate::config::{OracleConfig, OuijaConfig};
use crate::error::{OracleError, OracleResult};
use crate::sequence::{Sequencer, Step};

/// Answer categories and weights.
pub const ANSWER_CATEGORIES: &[(&str, f64)] = &[
    ("yes", 35.0),
    ("no", 35.0),
    ("unclear", 15.0),
    ("spelled", 15.0),
];

/// `(id, category, word, injection)` for every answer.
pub const ANSWERS: &[(&str, &str, &str, &str)] = &[
    ("yes", "yes", "YES", "The spirits answer yes."),
    ("no", "no", "NO", "The spirits answer no."),
    ("maybe", "unclear", "MAYBE", "The spirits will not commit to an answer."),
    ("hazy", "unclear", "HAZY", "The spirits' answer is clouded."),
    ("soon", "spelled", "SOON", "The spirits spell out: SOON."),
    ("beware", "spelled", "BEWARE", "The spirits spell out a warning: BEWARE."),
    ("trust", "spelled", "TRUST", "The spirits spell out: TRUST."),
    ("listen", "spelled", "LISTEN", "The spirits spell out: LISTEN."),
    ("thirteen", "spelled", "13", "The planchette drifts to the numbers: 1, 3."),
];

/// A place on the board the planchette can rest on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Planchette {
    /// Off to the side, not pointing at anything.
    Rest,
    /// The YES corner.
    Yes,
    /// The NO corner.
    No,
    /// A letter A-Z.
    Letter(char),
    /// A digit 0-9.
    Digit(char),
    /// GOODBYE, ending a spelled answer.
    Goodbye,
}

impl std::fmt::Display for Planchette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rest => write!(f, "rest"),
            Self::Yes => write!(f, "YES"),
            Self::No => write!(f, "NO"),
            Self::Letter(c) | Self::Digit(c) => write!(f, "{c}"),
            Self::Goodbye => write!(f, "GOODBYE"),
        }
    }
}

/// The positions the planchette visits to give `answer`.
pub fn planchette_path(answer: &DrawEntry) -> Vec<Planchette> {
    match answer.category_id.as_str() {
        "yes" => vec![Planchette::Yes],
        "no" => vec![Planchette::No],
        _ => {
            let mut path: Vec<Planchette> = answer
                .display_text
                .chars()
                .filter_map(|c| {
                    if c.is_ascii_alphabetic() {
                        Some(Planchette::Letter(c.to_ascii_uppercase()))
                    } else if c.is_ascii_digit() {
                        Some(Planchette::Digit(c))
                    } else {
                        None
                    }
                })
                .collect();
            path.push(Planchette::Goodbye);
            path
        }
    }
}

/// Build the answer catalog.
pub fn answer_catalog() -> OracleResult<Catalog> {
    let categories = ANSWER_CATEGORIES
        .iter()
        .map(|(id, weight)| Category::new(*id, *weight))
        .collect();
    let entries = ANSWERS
        .iter()
        .map(|(id, category, word, injection)| {
            DrawEntry::new(*id, *category, *word, "", *injection)
        })
        .collect();
    Ok(Catalog::new(categories, entries)?)
}

/// A finished consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OuijaReading {
    /// The question as asked (trimmed).
    pub question: String,
    /// The answer drawn.
    pub answer: DrawResult,
    /// Positions visited, in order.
    pub path: Vec<Planchette>,
}

impl OuijaReading {
    /// Text for the host conversation.
    pub fn injection_text(&self) -> String {
        format!(
            "{{{{user}}}} asked the spirit board: \"{}\". {}",
            self.question, self.answer.entry.injection_text
        )
    }
}

/// What happened when a consultation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultOutcome {
    /// The planchette is moving; the reading completes at `finishes_at`.
    Started {
        /// Time the reading completes.
        finishes_at: u64,
    },
    /// A consultation is already running; nothing changed.
    Busy,
}

/// Something visible happened on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OuijaEvent {
    /// The planchette began to stir.
    Stirred,
    /// The planchette moved to a new position.
    Moved(Planchette),
    /// The consultation completed.
    Finished(OuijaReading),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OuijaStep {
    Stir,
    MoveTo(Planchette),
    Settle,
}

#[derive(Debug)]
struct Consultation {
    question: String,
    answer: DrawResult,
    path: Vec<Planchette>,
    sequence: Sequencer<OuijaStep>,
}

/// A spirit board with its planchette and recent readings.
#[derive(Debug)]
pub struct OuijaBoard {
    catalog: Catalog,
    config: OuijaConfig,
    position: Planchette,
    consultation: Option<Consultation>,
    history: HistoryBuffer<OuijaReading>,
}

impl OuijaBoard {
    /// Create a board over any answer catalog.
    pub fn new(catalog: Catalog, config: OuijaConfig, history_cap: usize) -> Self {
        Self {
            catalog,
            config,
            position: Planchette::Rest,
            consultation: None,
            history: HistoryBuffer::new(history_cap),
        }
    }

    /// The built-in board.
    pub fn builtin(config: &OracleConfig) -> OracleResult<Self> {
        Ok(Self::new(
            answer_catalog()?,
            config.ouija.clone(),
            config.history_cap,
        ))
    }

    /// Where the planchette is now.
    pub fn position(&self) -> Planchette {
        self.position
    }

    /// Whether a consultation is running.
    pub fn is_busy(&self) -> bool {
        self.consultation.is_some()
    }

    /// The question currently being answered.
    pub fn current_question(&self) -> Option<&str> {
        self.consultation.as_ref().map(|c| c.question.as_str())
    }

    /// Recent readings, newest-first.
    pub fn history(&self) -> &HistoryBuffer<OuijaReading> {
        &self.history
    }

    /// The answer catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Trim a question and check it is askable.
    pub fn validate_question(&self, question: &str) -> OracleResult<String> {
        let trimmed = question.trim();
        if trimmed.is_empty() {
            return Err(OracleError::EmptyQuestion);
        }
        if trimmed.chars().count() > self.config.max_question_len {
            return Err(OracleError::QuestionTooLong {
                max: self.config.max_question_len,
            });
        }
        Ok(trimmed.to_string())
    }

    /// Ask a question. Invalid questions are rejected without touching the
    /// board; asking while a consultation runs is a no-op.
    pub fn consult(
        &mut self,
        question: &str,
        now: u64,
        rng: &mut dyn RandomSource,
    ) -> OracleResult<ConsultOutcome> {
        if self.consultation.is_some() {
            tracing::debug!("ouija consultation already in progress");
            return Ok(ConsultOutcome::Busy);
        }
        let question = self.validate_question(question).inspect_err(|e| {
            tracing::debug!(error = %e, "ouija question rejected");
        })?;

        let answer = DrawResult::new(self.catalog.draw(rng).clone(), now);
        let path = planchette_path(&answer.entry);

        let mut steps = Vec::with_capacity(path.len() + 2);
        steps.push(Step::new(self.config.initial_hold_ms, OuijaStep::Stir));
        steps.extend(
            path.iter()
                .map(|p| Step::new(self.config.move_ms, OuijaStep::MoveTo(*p))),
        );
        steps.push(Step::new(self.config.final_hold_ms, OuijaStep::Settle));
        let sequence = Sequencer::start(now, steps);
        let finishes_at = sequence.finishes_at().unwrap_or(now);

        tracing::debug!(
            answer = %answer.entry.id,
            moves = path.len(),
            finishes_at,
            "ouija consultation started"
        );
        self.consultation = Some(Consultation {
            question,
            answer,
            path,
            sequence,
        });
        Ok(ConsultOutcome::Started { finishes_at })
    }

    /// Advance the planchette to `now`, returning what happened in order.
    pub fn poll(&mut self, now: u64) -> Vec<OuijaEvent> {
        let Some(consultation) = self.consultation.as_mut() else {
            return Vec::new();
        };
        let mut events = Vec::new();
        let mut settled = false;
        for step in consultation.sequence.due(now) {
            match step {
                OuijaStep::Stir => events.push(OuijaEvent::Stirred),
                OuijaStep::MoveTo(p) => {
                    self.position = p;
                    events.push(OuijaEvent::Moved(p));
                }
                OuijaStep::Settle => settled = true,
            }
        }
        if !settled {
            return events;
        }
        if let Some(done) = self.consultation.take() {
            let reading = OuijaReading {
                question: done.question,
                answer: done.answer,
                path: done.path,
            };
            self.position = Planchette::Rest;
            self.history.push(reading.clone());
            events.push(OuijaEvent::Finished(reading));
        }
        events
    }

    /// Forget all recorded readings.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Abandon a running consultation and return the planchette to rest.
    pub fn cancel(&mut self) -> bool {
        self.position = Planchette::Rest;
        self.consultation.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyx_core::ScriptedRandom;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board() -> OuijaBoard {
        OuijaBoard::builtin(&OracleConfig::default()).unwrap()
    }

    #[test]
    fn empty_question_rejected_without_state_change() {
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(1);
        let err = b.consult("   ", 0, &mut rng).unwrap_err();
        assert!(matches!(err, OracleError::EmptyQuestion));
        assert!(!b.is_busy());
        assert_eq!(b.position(), Planchette::Rest);
        assert!(b.history().is_empty());
    }

    #[test]
    fn long_question_rejected() {
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(1);
        let question = "?".repeat(201);
        let err = b.consult(&question, 0, &mut rng).unwrap_err();
        assert!(matches!(err, OracleError::QuestionTooLong { max: 200 }));
        assert!(!b.is_busy());
    }

    #[test]
    fn yes_answer_timeline() {
        let mut b = board();
        // 0.1 * 100 = 10 lands in "yes".
        let mut rng = ScriptedRandom::new([0.1, 0.0]);
        let outcome = b.consult("  Will it rain?  ", 0, &mut rng).unwrap();
        assert_eq!(outcome, ConsultOutcome::Started { finishes_at: 3350 });
        assert_eq!(b.current_question(), Some("Will it rain?"));

        assert!(b.poll(1499).is_empty());
        assert_eq!(b.poll(1500), vec![OuijaEvent::Stirred]);
        assert_eq!(b.poll(2350), vec![OuijaEvent::Moved(Planchette::Yes)]);
        assert_eq!(b.position(), Planchette::Yes);
        assert!(b.poll(3349).is_empty());

        let events = b.poll(3350);
        assert_eq!(events.len(), 1);
        let OuijaEvent::Finished(reading) = &events[0] else {
            panic!("expected a finished reading, got {events:?}");
        };
        assert_eq!(reading.question, "Will it rain?");
        assert_eq!(reading.path, vec![Planchette::Yes]);
        assert_eq!(
            reading.injection_text(),
            "{{user}} asked the spirit board: \"Will it rain?\". The spirits answer yes."
        );
        assert_eq!(b.position(), Planchette::Rest);
        assert!(!b.is_busy());
        assert_eq!(b.history().len(), 1);
    }

    #[test]
    fn spelled_answer_walks_each_letter() {
        let mut b = board();
        // 0.9 * 100 = 90 lands in "spelled"; 0.0 picks SOON.
        let mut rng = ScriptedRandom::new([0.9, 0.0]);
        let outcome = b.consult("When?", 0, &mut rng).unwrap();
        // 1500 + 5 moves * 850 + 1000
        assert_eq!(outcome, ConsultOutcome::Started { finishes_at: 6750 });
        let moves: Vec<Planchette> = b
            .poll(u64::MAX)
            .into_iter()
            .filter_map(|e| match e {
                OuijaEvent::Moved(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(
            moves,
            vec![
                Planchette::Letter('S'),
                Planchette::Letter('O'),
                Planchette::Letter('O'),
                Planchette::Letter('N'),
                Planchette::Goodbye,
            ]
        );
    }

    #[test]
    fn second_question_while_busy_is_ignored() {
        let mut b = board();
        let mut rng = StdRng::seed_from_u64(4);
        b.consult("First?", 0, &mut rng).unwrap();
        assert_eq!(
            b.consult("Second?", 10, &mut rng).unwrap(),
            ConsultOutcome::Busy
        );
        // Busy wins over validation: a blank question while busy is still a no-op.
        assert_eq!(b.consult("", 10, &mut rng).unwrap(), ConsultOutcome::Busy);
        b.poll(u64::MAX);
        assert_eq!(b.history().len(), 1);
        assert_eq!(b.history().latest().unwrap().question, "First?");
    }

    #[test]
    fn cancel_returns_to_rest() {
        let mut b = board();
        let mut rng = ScriptedRandom::new([0.1, 0.0]);
        b.consult("Hello?", 0, &mut rng).unwrap();
        b.poll(2350);
        assert_eq!(b.position(), Planchette::Yes);
        assert!(b.cancel());
        assert_eq!(b.position(), Planchette::Rest);
        assert!(b.poll(u64::MAX).is_empty());
        assert!(b.history().is_empty());
    }

    #[test]
    fn digits_and_spaces_in_paths() {
        let entry = DrawEntry::new("x", "spelled", "1 3", "", "");
        assert_eq!(
            planchette_path(&entry),
            vec![Planchette::Digit('1'), Planchette::Digit('3'), Planchette::Goodbye]
        );
        let entry = DrawEntry::new("n", "no", "NO", "", "");
        assert_eq!(planchette_path(&entry), vec![Planchette::No]);
    }

    #[test]
    fn planchette_display() {
        assert_eq!(Planchette::Letter('A').to_string(), "A");
        assert_eq!(Planchette::Goodbye.to_string(), "GOODBYE");
        assert_eq!(Planchette::Yes.to_string(), "YES");
    }
}
