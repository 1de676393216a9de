// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod grammar;
pub mod launch;
pub mod logging;
pub mod session;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::{load_or_default, ConfigFile};
use crate::exec::{StopPolicy, Supervisor, SupervisorOptions};
use crate::launch::{build_launch, LaunchCommand};
use crate::session::{ConsoleReporter, Session, SessionCore};

/// How a `crackwatch` invocation ended.
#[derive(Debug)]
pub enum Outcome {
    /// `--dry-run`: the command line was printed, nothing ran.
    DryRun(LaunchCommand),
    /// The engine ran; final session state.
    Completed(SessionCore),
}

impl Outcome {
    pub fn succeeded(&self) -> bool {
        match self {
            Outcome::DryRun(_) => true,
            Outcome::Completed(core) => core.succeeded(),
        }
    }
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - engine command-line construction
/// - the supervisor and the session consuming its events
/// - Ctrl-C handling (first: graceful stop with bounded wait; second: kill)
pub async fn run(args: CliArgs) -> Result<Outcome> {
    let mut raw = load_or_default(args.config.as_deref())?;
    args.apply_overrides(&mut raw);
    let cfg = ConfigFile::try_from(raw)?;

    let launch = build_launch(&cfg)?;

    if args.dry_run {
        println!("{}", launch.command_line());
        return Ok(Outcome::DryRun(launch));
    }

    let supervisor = Arc::new(Supervisor::new(SupervisorOptions {
        event_buffer: cfg.event_buffer,
        deliver_timeout: cfg.deliver_timeout,
    }));

    let handle = supervisor.start(launch.engine, &launch.program, &launch.args)?;
    info!(run_id = handle.run_id, command = %launch.command_line(), "run started");

    spawn_interrupt_handler(Arc::clone(&supervisor), cfg.stop_timeout);

    let mut core = SessionCore::new(launch.engine);
    core.begin_run(launch.engine, &launch.command_line());

    let session = Session::new(core, handle.events, ConsoleReporter::new(args.show_output))
        .with_state(supervisor.subscribe());
    let core = session.run().await;

    let state = supervisor.wait_finished().await;
    info!(?state, results = core.results().len(), "run complete");

    Ok(Outcome::Completed(core))
}

/// Ctrl-C → graceful stop, force-killed after `stop_timeout`; a second
/// Ctrl-C kills immediately.
fn spawn_interrupt_handler(supervisor: Arc<Supervisor>, stop_timeout: std::time::Duration) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            return;
        }
        info!("interrupt received; stopping engine");
        supervisor.request_stop(StopPolicy::KillAfter(stop_timeout));

        if tokio::signal::ctrl_c().await.is_ok() {
            info!("second interrupt; killing engine");
            supervisor.kill();
        }
    });
}
