use std::sync::{Arc, Mutex};

use crackwatch::session::{Reporter, SessionUpdate};

/// A reporter that records every update it is given.
///
/// The update list is shared, so a test can keep a handle to it after the
/// reporter itself has been moved into a `Session`.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    updates: Arc<Mutex<Vec<SessionUpdate>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<SessionUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.updates()
            .into_iter()
            .filter_map(|u| match u {
                SessionUpdate::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, update: &SessionUpdate) {
        self.updates.lock().unwrap().push(update.clone());
    }
}
