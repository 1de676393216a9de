// src/session/mod.rs

//! Consumer side of a run.
//!
//! Everything a run produces reaches the consumer as a [`RunEvent`] on the
//! run's event channel. The pure state machine lives in [`core`]; the async
//! shell that drains the channel is [`runtime`]; what the user actually sees
//! is decided by a [`Reporter`].

use crate::exec::OutputLine;
use crate::grammar::Event;

/// Events flowing from a run's parse worker to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// One raw line of engine output, classified or not.
    Output(OutputLine),
    /// A structured event extracted from the preceding output line.
    Parsed(Event),
    /// The engine process is gone and all of its output has been delivered.
    /// Sent exactly once, always last.
    Exited {
        exit_code: i32,
        crashed: bool,
        /// A stop or kill was requested for this run before it exited.
        stopped: bool,
    },
}

pub mod core;
pub mod reporter;
pub mod results;
pub mod runtime;

pub use self::core::{ProgressState, SessionCore, SessionStep, SessionUpdate};
pub use reporter::{ConsoleReporter, Reporter};
pub use results::{ResultRecord, ResultTable};
pub use runtime::Session;
