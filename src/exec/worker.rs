// src/exec/worker.rs

//! The per-run parse worker.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::exec::dispatch::Dispatcher;
use crate::exec::stream::{OutputBatch, OutputLine};
use crate::grammar::Classifier;
use crate::session::RunEvent;

/// Spawn the single parse worker of a run.
///
/// Batches are taken strictly in arrival order and each one is fully
/// classified and dispatched before the next is looked at, so two reads that
/// arrive close together are never parsed concurrently. For every line the
/// raw [`RunEvent::Output`] is dispatched first, followed by the events the
/// classifier produced for it.
///
/// The worker finishes once both stream readers have dropped their senders,
/// and hands the dispatcher back so the caller can report the exit.
pub fn spawn_parse_worker(
    run_id: u64,
    mut classifier: Classifier,
    mut batch_rx: mpsc::Receiver<OutputBatch>,
    mut dispatcher: Dispatcher,
) -> JoinHandle<Dispatcher> {
    tokio::spawn(async move {
        let mut lines_seen: u64 = 0;

        while let Some(batch) = batch_rx.recv().await {
            let stream = batch.stream;
            for text in batch.lines {
                lines_seen += 1;
                debug!(run_id, %stream, "{}", text);

                let events = classifier.classify(&text);
                trace!(run_id, count = events.len(), "classified line");

                dispatcher
                    .deliver(RunEvent::Output(OutputLine { stream, text }))
                    .await;
                for event in events {
                    dispatcher.deliver(RunEvent::Parsed(event)).await;
                }
            }
        }

        debug!(
            run_id,
            lines = lines_seen,
            dropped = dispatcher.dropped(),
            pulse = classifier.state().pulse,
            "parse worker drained"
        );
        dispatcher
    })
}
