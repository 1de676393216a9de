// src/session/core.rs

//! Pure session state machine.
//!
//! [`SessionCore`] is what the consumer knows about the current run: the
//! status line, the progress indicator, the raw transcript and the result
//! table. It consumes [`RunEvent`]s one at a time and reports what changed
//! as a [`SessionStep`].
//!
//! It has no channels, no Tokio types and performs no IO, so it can be
//! driven directly from tests.

use crate::exec::OutputLine;
use crate::grammar::Event;
use crate::session::results::{ResultRecord, ResultTable};
use crate::session::RunEvent;
use crate::types::EngineVariant;

/// Progress indicator shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    /// Engine running, no percentage reported yet.
    Indeterminate,
    Percent(u8),
}

/// A change the consumer should present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// A raw output line was appended to the transcript.
    Transcript(OutputLine),
    Status(String),
    Progress(u8),
    ResultAdded(ResultRecord),
    Finished { exit_code: i32, crashed: bool },
}

/// Result of feeding one event into the core.
#[derive(Debug, Clone)]
pub struct SessionStep {
    pub updates: Vec<SessionUpdate>,
    /// Whether more events are expected for this run.
    pub keep_running: bool,
}

#[derive(Debug)]
pub struct SessionCore {
    engine: EngineVariant,
    status: String,
    progress: ProgressState,
    transcript: Vec<String>,
    results: ResultTable,
    stop_requested: bool,
    finished: Option<(i32, bool)>,
}

impl SessionCore {
    pub fn new(engine: EngineVariant) -> Self {
        Self {
            engine,
            status: "Ready".to_string(),
            progress: ProgressState::Percent(0),
            transcript: Vec::new(),
            results: ResultTable::new(),
            stop_requested: false,
            finished: None,
        }
    }

    /// Reset for a new run of `engine` launched as `command_line`.
    ///
    /// Clears the transcript and the result table; the command line becomes
    /// the first transcript entry.
    pub fn begin_run(&mut self, engine: EngineVariant, command_line: &str) -> SessionStep {
        self.engine = engine;
        self.transcript.clear();
        self.results.clear();
        self.stop_requested = false;
        self.finished = None;
        self.progress = ProgressState::Indeterminate;
        self.status = format!("Starting {engine}...");
        self.transcript.push(command_line.to_string());

        SessionStep {
            updates: vec![SessionUpdate::Status(self.status.clone())],
            keep_running: true,
        }
    }

    /// The user asked the engine to stop; the run is not over yet.
    pub fn note_stop_requested(&mut self) -> SessionStep {
        if self.stop_requested || self.finished.is_some() {
            return SessionStep {
                updates: Vec::new(),
                keep_running: self.finished.is_none(),
            };
        }
        self.stop_requested = true;
        self.status = format!("Stopping {}...", self.engine);
        SessionStep {
            updates: vec![SessionUpdate::Status(self.status.clone())],
            keep_running: true,
        }
    }

    /// Apply one event from the run.
    pub fn step(&mut self, event: RunEvent) -> SessionStep {
        let updates = match event {
            RunEvent::Output(line) => {
                self.transcript.push(line.text.clone());
                vec![SessionUpdate::Transcript(line)]
            }
            RunEvent::Parsed(Event::Status { message }) => {
                self.status = message.clone();
                vec![SessionUpdate::Status(message)]
            }
            RunEvent::Parsed(Event::Progress { percent }) => {
                self.progress = ProgressState::Percent(percent);
                vec![SessionUpdate::Progress(percent)]
            }
            RunEvent::Parsed(Event::Result { hash, secret }) => {
                let record = ResultRecord { hash, secret };
                self.results.append(record.clone());
                vec![SessionUpdate::ResultAdded(record)]
            }
            RunEvent::Exited {
                exit_code,
                crashed,
                stopped,
            } => {
                return self.finish(exit_code, crashed, stopped);
            }
        };

        SessionStep {
            updates,
            keep_running: true,
        }
    }

    /// `stopped` comes from the supervisor and covers stop requests this
    /// core never saw as a `Stopping` state change.
    fn finish(&mut self, exit_code: i32, crashed: bool, stopped: bool) -> SessionStep {
        self.stop_requested |= stopped;
        self.finished = Some((exit_code, crashed));
        if self.progress == ProgressState::Indeterminate {
            self.progress = ProgressState::Percent(0);
        }

        let name = self.engine.display_name();
        self.status = if crashed && self.stop_requested {
            format!("{name} was stopped")
        } else if crashed {
            format!("{name} crashed")
        } else if exit_code == 0 {
            format!("{name} finished successfully")
        } else {
            format!("{name} finished with error code: {exit_code}")
        };

        SessionStep {
            updates: vec![
                SessionUpdate::Finished { exit_code, crashed },
                SessionUpdate::Status(self.status.clone()),
            ],
            keep_running: false,
        }
    }

    pub fn engine(&self) -> EngineVariant {
        self.engine
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn results(&self) -> &ResultTable {
        &self.results
    }

    /// `(exit_code, crashed)` once the run has ended.
    pub fn finished(&self) -> Option<(i32, bool)> {
        self.finished
    }

    /// The run ended with a clean zero exit.
    pub fn succeeded(&self) -> bool {
        self.finished == Some((0, false))
    }
}
