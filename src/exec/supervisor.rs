// src/exec/supervisor.rs

//! Engine process supervisor.
//!
//! A [`Supervisor`] runs at most one engine process at a time. `start`
//! spawns the process and wires up its pipeline:
//!
//! ```text
//! stdout --reader--\
//!                   +--> parse worker --> Dispatcher --> RunHandle::events
//! stderr --reader--/
//! ```
//!
//! A background "run task" owns the child, reacts to stop/kill requests and,
//! once the process is gone, waits for the pipeline to drain before it marks
//! the run `Finished` and sends the single `Exited` report.

use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, warn};

use crate::errors::{CrackwatchError, Result};
use crate::exec::dispatch::Dispatcher;
use crate::exec::stream::{spawn_stream_reader, OutputBatch, StreamKind};
use crate::exec::worker::spawn_parse_worker;
use crate::grammar::Classifier;
use crate::session::RunEvent;
use crate::types::EngineVariant;

/// Reference grace period between a stop request and a forced kill.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_millis(5000);

/// How long readers may keep draining after the process has exited.
///
/// Bounds the case where a grandchild inherited the pipes and keeps them
/// open after the engine itself is gone.
const PIPE_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

const BATCH_BUFFER: usize = 32;

/// Lifecycle of the supervised process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionState {
    #[default]
    Idle,
    Running,
    Stopping,
    Finished {
        exit_code: i32,
        /// Terminated by a signal rather than exiting on its own.
        crashed: bool,
    },
}

impl ExecutionState {
    /// The process is alive (running or being stopped).
    pub fn is_active(&self) -> bool {
        matches!(self, ExecutionState::Running | ExecutionState::Stopping)
    }
}

/// What to do if the engine ignores a graceful stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPolicy {
    /// Ask once and wait for as long as it takes.
    Graceful,
    /// Ask, then force-kill if still alive after this long.
    KillAfter(Duration),
}

#[derive(Debug, Clone, Copy)]
enum Control {
    Terminate(StopPolicy),
    Kill,
}

#[derive(Debug, Clone, Copy)]
pub struct SupervisorOptions {
    /// Capacity of each run's event channel.
    pub event_buffer: usize,
    /// Per-event bound on waiting for the consumer.
    pub deliver_timeout: Duration,
}

impl Default for SupervisorOptions {
    fn default() -> Self {
        Self {
            event_buffer: 64,
            deliver_timeout: Duration::from_secs(2),
        }
    }
}

/// Consumer side of one run.
#[derive(Debug)]
pub struct RunHandle {
    pub run_id: u64,
    pub engine: EngineVariant,
    /// Every line, classified event and finally the exit report of this run.
    pub events: mpsc::Receiver<RunEvent>,
}

struct ActiveRun {
    run_id: u64,
    control: mpsc::UnboundedSender<Control>,
}

pub struct Supervisor {
    options: SupervisorOptions,
    state: Arc<watch::Sender<ExecutionState>>,
    active: Mutex<Option<ActiveRun>>,
    next_run_id: AtomicU64,
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("options", &self.options)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Supervisor {
    pub fn new(options: SupervisorOptions) -> Self {
        let (state, _) = watch::channel(ExecutionState::Idle);
        Self {
            options,
            state: Arc::new(state),
            active: Mutex::new(None),
            next_run_id: AtomicU64::new(1),
        }
    }

    pub fn state(&self) -> ExecutionState {
        *self.state.borrow()
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ExecutionState> {
        self.state.subscribe()
    }

    /// Wait until the current (or last) run is `Finished`.
    ///
    /// Returns immediately with `Idle` when nothing was ever started.
    pub async fn wait_finished(&self) -> ExecutionState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|s| !s.is_active()).await {
            Ok(state) => *state,
            Err(_) => self.state(),
        }
    }

    /// Launch `command` with `args` and start streaming its output.
    ///
    /// Must be called from within a Tokio runtime. Fails with
    /// [`CrackwatchError::AlreadyRunning`] while a previous process is still
    /// alive, and with [`CrackwatchError::LaunchFailed`] if the executable
    /// cannot be started. A fresh classifier (and so fresh parser state) is
    /// created for every run.
    pub fn start(
        &self,
        engine: EngineVariant,
        command: &str,
        args: &[String],
    ) -> Result<RunHandle> {
        let mut active = self
            .active
            .lock()
            .map_err(|_| anyhow!("supervisor lock poisoned"))?;

        if self.state().is_active() {
            warn!(%engine, command, "start requested while an engine is still running");
            return Err(CrackwatchError::AlreadyRunning);
        }

        let run_id = self.next_run_id.fetch_add(1, Ordering::Relaxed);

        let mut cmd = Command::new(command);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| CrackwatchError::LaunchFailed {
            command: command.to_string(),
            source,
        })?;

        let pid = child.id();
        info!(run_id, %engine, command, ?args, ?pid, "engine process started");

        let (dispatcher, events) =
            Dispatcher::channel(self.options.event_buffer, self.options.deliver_timeout);
        let (batch_tx, batch_rx) = mpsc::channel::<OutputBatch>(BATCH_BUFFER);

        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_stream_reader(
                run_id,
                StreamKind::Stdout,
                stdout,
                batch_tx.clone(),
            ));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_stream_reader(
                run_id,
                StreamKind::Stderr,
                stderr,
                batch_tx.clone(),
            ));
        }
        // Readers hold the only senders; the worker ends when both are done.
        drop(batch_tx);

        let exit_dispatcher = dispatcher.clone();
        let worker = spawn_parse_worker(run_id, Classifier::new(engine), batch_rx, dispatcher);

        let (control_tx, control_rx) = mpsc::unbounded_channel();
        self.state.send_replace(ExecutionState::Running);

        let run = RunTask {
            run_id,
            child,
            control_rx,
            state: Arc::clone(&self.state),
            readers,
            worker,
            exit_dispatcher,
            stop_requested: false,
        };
        tokio::spawn(run.run());

        *active = Some(ActiveRun {
            run_id,
            control: control_tx,
        });

        Ok(RunHandle {
            run_id,
            engine,
            events,
        })
    }

    /// Ask the running engine to exit.
    ///
    /// Returns `false` (and does nothing) unless the state is `Running`.
    /// Otherwise the state becomes `Stopping` before this returns and the
    /// graceful request is sent; whether to escalate to a kill is up to
    /// `policy`. Never blocks.
    pub fn request_stop(&self, policy: StopPolicy) -> bool {
        let transitioned = self.state.send_if_modified(|state| {
            if *state == ExecutionState::Running {
                *state = ExecutionState::Stopping;
                true
            } else {
                false
            }
        });

        if !transitioned {
            debug!(state = ?self.state(), "stop requested but no engine is running");
            return false;
        }

        self.send_control(Control::Terminate(policy))
    }

    /// Force-terminate the running engine immediately.
    pub fn kill(&self) -> bool {
        if !self.state().is_active() {
            debug!("kill requested but no engine is running");
            return false;
        }

        self.state.send_if_modified(|state| {
            if *state == ExecutionState::Running {
                *state = ExecutionState::Stopping;
                true
            } else {
                false
            }
        });

        self.send_control(Control::Kill)
    }

    fn send_control(&self, control: Control) -> bool {
        let Ok(active) = self.active.lock() else {
            error!("supervisor lock poisoned; cannot deliver {control:?}");
            return false;
        };
        match active.as_ref() {
            Some(run) => {
                info!(run_id = run.run_id, ?control, "forwarding control request to engine");
                run.control.send(control).is_ok()
            }
            None => false,
        }
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        if self.state().is_active() {
            self.send_control(Control::Terminate(StopPolicy::KillAfter(
                DEFAULT_STOP_TIMEOUT,
            )));
        }
    }
}

/// Background owner of one engine process.
struct RunTask {
    run_id: u64,
    child: Child,
    control_rx: mpsc::UnboundedReceiver<Control>,
    state: Arc<watch::Sender<ExecutionState>>,
    readers: Vec<JoinHandle<()>>,
    worker: JoinHandle<Dispatcher>,
    exit_dispatcher: Dispatcher,
    /// Set once any stop or kill request reached this run.
    stop_requested: bool,
}

impl RunTask {
    async fn run(mut self) {
        let run_id = self.run_id;
        let (exit_code, crashed) = self.wait_for_exit().await;

        // A request that raced with the exit still counts.
        while self.control_rx.try_recv().is_ok() {
            self.stop_requested = true;
        }
        let stopped = self.stop_requested;
        info!(run_id, exit_code, crashed, stopped, "engine process exited");

        self.drain_pipeline().await;

        self.state.send_replace(ExecutionState::Finished { exit_code, crashed });
        self.exit_dispatcher
            .deliver_exit(exit_code, crashed, stopped)
            .await;
    }

    /// Wait for the process to go away, honouring stop and kill requests.
    async fn wait_for_exit(&mut self) -> (i32, bool) {
        let mut kill_deadline: Option<Instant> = None;

        let status = loop {
            let deadline = kill_deadline;
            let escalate = async move {
                match deadline {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                status = self.child.wait() => break status,

                Some(control) = self.control_rx.recv() => {
                    self.stop_requested = true;
                    match control {
                        Control::Terminate(policy) => {
                            self.terminate();
                            if let StopPolicy::KillAfter(grace) = policy {
                                kill_deadline = Some(Instant::now() + grace);
                            }
                        }
                        Control::Kill => {
                            self.force_kill();
                            kill_deadline = None;
                        }
                    }
                }

                _ = escalate => {
                    warn!(run_id = self.run_id, "engine ignored stop request; killing");
                    self.force_kill();
                    kill_deadline = None;
                }
            }
        };

        match status {
            Ok(status) => match status.code() {
                Some(code) => (code, false),
                None => (-1, true),
            },
            Err(e) => {
                error!(run_id = self.run_id, error = %e, "failed to wait for engine process");
                (-1, true)
            }
        }
    }

    /// Graceful termination request (SIGTERM where available).
    #[cfg(unix)]
    fn terminate(&mut self) {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let Some(pid) = self.child.id() else {
            debug!(run_id = self.run_id, "terminate: process already reaped");
            return;
        };
        info!(run_id = self.run_id, pid, "sending SIGTERM to engine");
        if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            warn!(run_id = self.run_id, pid, error = %e, "failed to signal engine");
        }
    }

    #[cfg(not(unix))]
    fn terminate(&mut self) {
        // No graceful signal to send; a kill is the only way to stop it.
        self.force_kill();
    }

    fn force_kill(&mut self) {
        if let Err(e) = self.child.start_kill() {
            warn!(run_id = self.run_id, error = %e, "failed to kill engine process");
        }
    }

    /// Let the readers flush what the process wrote, then let the worker
    /// classify and dispatch all of it.
    async fn drain_pipeline(&mut self) {
        let deadline = Instant::now() + PIPE_DRAIN_TIMEOUT;
        for reader in self.readers.iter_mut() {
            if tokio::time::timeout_at(deadline, &mut *reader).await.is_err() {
                warn!(run_id = self.run_id, "output pipe still open after exit; abandoning it");
                reader.abort();
            }
        }

        if let Err(e) = (&mut self.worker).await {
            error!(run_id = self.run_id, error = %e, "parse worker failed");
        }
    }
}
