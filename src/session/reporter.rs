// src/session/reporter.rs

//! Presentation of session updates.

use tracing::{info, warn};

use crate::session::core::SessionUpdate;

/// Receives every update of a session, in order.
///
/// Production uses [`ConsoleReporter`]; tests can record updates instead.
pub trait Reporter: Send {
    fn report(&mut self, update: &SessionUpdate);
}

/// Terminal reporter used by the binary.
///
/// - recovered credentials go to stdout as `hash:secret`, one per line;
/// - status and progress go to the log;
/// - raw engine output is echoed to stderr only with `show_output`.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    show_output: bool,
    last_progress: Option<u8>,
}

impl ConsoleReporter {
    pub fn new(show_output: bool) -> Self {
        Self {
            show_output,
            last_progress: None,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, update: &SessionUpdate) {
        match update {
            SessionUpdate::Transcript(line) => {
                if self.show_output {
                    eprintln!("{}", line.text);
                }
            }
            SessionUpdate::Status(message) => info!("{message}"),
            SessionUpdate::Progress(percent) => {
                if self.last_progress != Some(*percent) {
                    self.last_progress = Some(*percent);
                    info!(percent = *percent, "progress");
                }
            }
            SessionUpdate::ResultAdded(record) => {
                println!("{}:{}", record.hash, record.secret);
            }
            SessionUpdate::Finished { exit_code, crashed } => {
                if *crashed || *exit_code != 0 {
                    warn!(exit_code = *exit_code, crashed = *crashed, "engine exited abnormally");
                }
            }
        }
    }
}
