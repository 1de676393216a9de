// src/grammar/mod.rs

//! Engine output grammars.
//!
//! Each supported engine prints its own unstructured text. A grammar turns
//! one complete output line into zero or more [`Event`]s:
//!
//! - [`hashcat`] understands hashcat's `Status`/`Progress` lines and
//!   `hash:plain` results.
//! - [`john`] understands John the Ripper's `Loaded`/`guesses:` lines, its
//!   `Current` heartbeat and `user:hash:plain` results.
//!
//! A [`Classifier`] pairs one grammar with the mutable [`ParserRunState`] of
//! a single run. A fresh classifier is built for every run, so no state ever
//! carries over between runs or between engines.

pub mod hashcat;
pub mod john;

use crate::types::EngineVariant;

pub use hashcat::HashcatGrammar;
pub use john::JohnGrammar;

/// Structured information extracted from one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A status line, reported verbatim.
    Status { message: String },
    /// Progress in percent, always within `0..=100`.
    Progress { percent: u8 },
    /// A recovered credential.
    Result { hash: String, secret: String },
}

/// Mutable, run-scoped parser state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserRunState {
    /// Last synthetic heartbeat value handed out (John only).
    pub pulse: u8,
}

/// A per-engine line grammar.
///
/// Implementations must never fail: lines they do not understand simply
/// produce no events.
pub trait EngineGrammar: Send + Sync {
    fn classify(&self, line: &str, state: &mut ParserRunState) -> Vec<Event>;
}

/// One run's classifier: the engine's grammar plus that run's state.
pub struct Classifier {
    engine: EngineVariant,
    grammar: Box<dyn EngineGrammar>,
    state: ParserRunState,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("engine", &self.engine)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Classifier {
    /// Build a classifier for `engine` with freshly initialised run state.
    pub fn new(engine: EngineVariant) -> Self {
        let grammar: Box<dyn EngineGrammar> = match engine {
            EngineVariant::Hashcat => Box::new(HashcatGrammar),
            EngineVariant::John => Box::new(JohnGrammar),
        };
        Self {
            engine,
            grammar,
            state: ParserRunState::default(),
        }
    }

    pub fn engine(&self) -> EngineVariant {
        self.engine
    }

    pub fn state(&self) -> ParserRunState {
        self.state
    }

    pub fn classify(&mut self, line: &str) -> Vec<Event> {
        self.grammar.classify(line, &mut self.state)
    }
}
