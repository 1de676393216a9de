// src/grammar/hashcat.rs

//! hashcat output grammar.
//!
//! hashcat pads its status labels with dots (`Status...........: Running`),
//! so the `Status` and `Progress` markers accept any run of dots between the
//! label and the colon. Rules are checked in order and the first match wins:
//!
//! 1. `Status:` at the start of the line -> [`Event::Status`].
//! 2. `Progress:` followed later by a `%` -> [`Event::Progress`] using the
//!    number right before the `%` (fraction truncated, clamped to 0..=100).
//!    A progress marker without a usable percentage yields nothing.
//! 3. Any other line with a `:` -> [`Event::Result`], split at the first `:`.

use std::sync::LazyLock;

use regex::Regex;

use super::{EngineGrammar, Event, ParserRunState};

static STATUS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Status\.*:").expect("valid status pattern"));

static PROGRESS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Progress\.*:").expect("valid progress pattern"));

// Lazy gap so the first percentage after the marker is used.
static PROGRESS_PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Progress\.*:[^%]*?(-?[0-9]+)(?:\.[0-9]*)?%").expect("valid percent pattern")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct HashcatGrammar;

impl HashcatGrammar {
    fn progress_percent(line: &str) -> Option<u8> {
        let caps = PROGRESS_PERCENT.captures(line)?;
        let digits = &caps[1];
        // Out of i64 range is far outside 0..=100 either way.
        let value = digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        });
        Some(value.clamp(0, 100) as u8)
    }
}

impl EngineGrammar for HashcatGrammar {
    fn classify(&self, line: &str, _state: &mut ParserRunState) -> Vec<Event> {
        if STATUS_MARKER.is_match(line) {
            return vec![Event::Status {
                message: line.to_string(),
            }];
        }

        if PROGRESS_MARKER.is_match(line) {
            return Self::progress_percent(line)
                .map(|percent| vec![Event::Progress { percent }])
                .unwrap_or_default();
        }

        match line.split_once(':') {
            Some((hash, secret)) => vec![Event::Result {
                hash: hash.trim().to_string(),
                secret: secret.trim().to_string(),
            }],
            None => Vec::new(),
        }
    }
}
