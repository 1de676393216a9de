// src/exec/segmenter.rs

//! Incremental line splitting for one output stream.

/// Turns arbitrarily-sized byte chunks into complete lines.
///
/// Bytes are buffered until a `\n` arrives; a trailing `\r` is dropped so
/// CRLF output looks the same as LF output. Lines are decoded only once they
/// are complete, so a multi-byte character split across two reads still
/// decodes correctly. Invalid UTF-8 is replaced with `U+FFFD`.
#[derive(Debug, Default)]
pub struct LineSegmenter {
    carry: Vec<u8>,
}

impl LineSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and return every line it completed, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut rest = chunk;

        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            self.carry.extend_from_slice(&rest[..pos]);
            lines.push(decode_line(&self.carry));
            self.carry.clear();
            rest = &rest[pos + 1..];
        }

        self.carry.extend_from_slice(rest);
        lines
    }

    /// End of stream: return the unterminated trailing fragment, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.carry.is_empty() {
            return None;
        }
        let line = decode_line(&self.carry);
        self.carry.clear();
        Some(line)
    }

    /// Bytes currently held back waiting for a line break.
    pub fn pending(&self) -> usize {
        self.carry.len()
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
