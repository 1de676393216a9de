use crackwatch::session::RunEvent;
use tokio::sync::mpsc;

/// A fake engine: `sh -c <script>`.
///
/// Returns the `(command, args)` pair for `Supervisor::start`.
pub fn sh(script: &str) -> (String, Vec<String>) {
    ("sh".to_string(), vec!["-c".to_string(), script.to_string()])
}

/// Drain a run's events until the channel closes.
pub async fn collect_events(mut rx: mpsc::Receiver<RunEvent>) -> Vec<RunEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

/// The raw transcript lines in `events`, in order.
pub fn output_lines(events: &[RunEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            RunEvent::Output(line) => Some(line.text.clone()),
            _ => None,
        })
        .collect()
}
