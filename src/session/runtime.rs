// src/session/runtime.rs

use std::fmt;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::exec::ExecutionState;
use crate::session::core::{SessionCore, SessionStep};
use crate::session::reporter::Reporter;
use crate::session::RunEvent;

/// Drains one run's event channel on the consumer's side.
///
/// This is a thin IO shell around [`SessionCore`]: every event is applied to
/// the core and every resulting update is handed to the [`Reporter`], in the
/// order the run produced them. Optionally it also watches the supervisor's
/// state so a pending stop shows up in the status line.
pub struct Session<R: Reporter> {
    core: SessionCore,
    events: mpsc::Receiver<RunEvent>,
    state: Option<watch::Receiver<ExecutionState>>,
    reporter: R,
}

impl<R: Reporter> fmt::Debug for Session<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<R: Reporter> Session<R> {
    pub fn new(core: SessionCore, events: mpsc::Receiver<RunEvent>, reporter: R) -> Self {
        Self {
            core,
            events,
            state: None,
            reporter,
        }
    }

    /// Also follow supervisor state transitions.
    pub fn with_state(mut self, state: watch::Receiver<ExecutionState>) -> Self {
        self.state = Some(state);
        self
    }

    /// Main loop: runs until the exit report arrives or the channel closes,
    /// then returns the final core state.
    pub async fn run(mut self) -> SessionCore {
        info!(engine = %self.core.engine(), "session started");

        loop {
            let watching = self.state.is_some();
            let event = tokio::select! {
                biased;

                changed = wait_state_change(&mut self.state), if watching => {
                    match changed {
                        Some(ExecutionState::Stopping) => {
                            let step = self.core.note_stop_requested();
                            self.present(step);
                        }
                        Some(_) => {}
                        None => self.state = None,
                    }
                    continue;
                }

                event = self.events.recv() => event,
            };

            let Some(event) = event else {
                info!("run event channel closed before exit report");
                break;
            };

            let step = self.core.step(event);
            let keep_running = step.keep_running;
            self.present(step);

            if !keep_running {
                debug!("exit report received; session done");
                break;
            }
        }

        info!(
            status = %self.core.status(),
            results = self.core.results().len(),
            "session finished"
        );
        self.core
    }

    fn present(&mut self, step: SessionStep) {
        for update in &step.updates {
            self.reporter.report(update);
        }
    }
}

/// Wait for the next state value; `None` once the supervisor is gone.
async fn wait_state_change(
    state: &mut Option<watch::Receiver<ExecutionState>>,
) -> Option<ExecutionState> {
    let rx = state.as_mut()?;
    rx.changed().await.ok()?;
    let current = *rx.borrow_and_update();
    Some(current)
}
