// src/grammar/john.rs

//! John the Ripper output grammar.
//!
//! John never reports a completion percentage. Instead every `Current` line
//! advances a synthetic pulse by 5 (wrapping at 100) so consumers can show
//! that the engine is alive. The pulse is an activity indicator only and is
//! not monotonic.

use super::{EngineGrammar, Event, ParserRunState};

const PULSE_STEP: u8 = 5;

/// Lines containing this are John's own summary ("Loaded 1 password hash"),
/// never a cracked credential.
const RESULT_GUARD: &str = "password hash";

#[derive(Debug, Clone, Copy, Default)]
pub struct JohnGrammar;

impl JohnGrammar {
    /// Split `[user:]hash:password` into `(hash, password)`.
    ///
    /// The password is everything after the last `:`; of what remains, the
    /// last `:`-separated field is the hash.
    fn split_credential(line: &str) -> Option<(&str, &str)> {
        let (rest, password) = line.rsplit_once(':')?;
        let hash = match rest.rsplit_once(':') {
            Some((_user, hash)) => hash,
            None => rest,
        };
        Some((hash.trim(), password.trim()))
    }
}

impl EngineGrammar for JohnGrammar {
    fn classify(&self, line: &str, state: &mut ParserRunState) -> Vec<Event> {
        let mut events = Vec::new();

        if line.contains("Loaded") || line.contains("guesses:") {
            events.push(Event::Status {
                message: line.to_string(),
            });
        }

        if line.contains("Current") {
            state.pulse = (state.pulse + PULSE_STEP) % 100;
            events.push(Event::Progress {
                percent: state.pulse,
            });
        }

        if events.is_empty() && !line.contains(RESULT_GUARD) {
            if let Some((hash, secret)) = Self::split_credential(line) {
                events.push(Event::Result {
                    hash: hash.to_string(),
                    secret: secret.to_string(),
                });
            }
        }

        events
    }
}
