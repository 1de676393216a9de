// src/exec/dispatch.rs

//! Bounded hand-off of run events from the parse worker to the consumer.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendTimeoutError;
use tracing::{debug, warn};

use crate::grammar::Event;
use crate::session::RunEvent;

/// Sending half of a run's event channel.
///
/// Delivery waits for the consumer while the channel is full, but never
/// longer than `deliver_timeout` per event: an event that cannot be handed
/// over in time is dropped and counted. Results and the exit report are
/// never dropped this way. Once the consumer has gone away,
/// every delivery is a silent no-op.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<RunEvent>,
    deliver_timeout: Duration,
    dropped: u64,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver the consumer drains.
    pub fn channel(
        capacity: usize,
        deliver_timeout: Duration,
    ) -> (Self, mpsc::Receiver<RunEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let dispatcher = Self {
            tx,
            deliver_timeout,
            dropped: 0,
        };
        (dispatcher, rx)
    }

    /// Deliver one event. Returns `false` if it was not delivered.
    ///
    /// Recovered credentials are exempt from the timeout: they wait for
    /// capacity like the exit report and are only lost if the consumer is
    /// gone.
    pub async fn deliver(&mut self, event: RunEvent) -> bool {
        if matches!(event, RunEvent::Parsed(Event::Result { .. })) {
            return self.tx.send(event).await.is_ok();
        }

        match self.tx.send_timeout(event, self.deliver_timeout).await {
            Ok(()) => true,
            Err(SendTimeoutError::Timeout(event)) => {
                self.dropped += 1;
                warn!(
                    ?event,
                    dropped = self.dropped,
                    timeout_ms = self.deliver_timeout.as_millis() as u64,
                    "consumer did not drain events in time; dropping event"
                );
                false
            }
            Err(SendTimeoutError::Closed(_)) => false,
        }
    }

    /// Deliver the terminal exit report.
    ///
    /// This one waits for capacity without a bound: the exit report is
    /// sent exactly once per run and must not be dropped.
    pub async fn deliver_exit(&self, exit_code: i32, crashed: bool, stopped: bool) -> bool {
        let sent = self
            .tx
            .send(RunEvent::Exited {
                exit_code,
                crashed,
                stopped,
            })
            .await
            .is_ok();
        if !sent {
            debug!(exit_code, crashed, stopped, "consumer gone; exit report not delivered");
        }
        sent
    }

    /// Number of events dropped because the consumer was too slow.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
