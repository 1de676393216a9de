// src/exec/stream.rs

//! Output stream readers.
//!
//! Each of the child's two pipes gets its own reader task and its own
//! [`LineSegmenter`]. Readers wake when the pipe has data, split what they
//! got into complete lines and forward them as one [`OutputBatch`] per read.
//! The two streams are never mixed into one buffer; ordering is preserved per
//! stream only.

use std::fmt;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::exec::segmenter::LineSegmenter;

const READ_CHUNK: usize = 8 * 1024;

/// Which pipe a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => f.write_str("stdout"),
            StreamKind::Stderr => f.write_str("stderr"),
        }
    }
}

/// One complete line of engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub stream: StreamKind,
    pub text: String,
}

/// The lines completed by a single read from one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBatch {
    pub stream: StreamKind,
    pub lines: Vec<String>,
}

/// Spawn a reader task for one pipe.
///
/// The task ends at end-of-stream (after flushing any unterminated final
/// line), on a read error, or when the batch receiver is gone.
pub fn spawn_stream_reader<R>(
    run_id: u64,
    stream: StreamKind,
    reader: R,
    batch_tx: mpsc::Sender<OutputBatch>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        read_stream(run_id, stream, reader, batch_tx).await;
        debug!(run_id, %stream, "stream reader ended");
    })
}

async fn read_stream<R>(
    run_id: u64,
    stream: StreamKind,
    mut reader: R,
    batch_tx: mpsc::Sender<OutputBatch>,
) where
    R: AsyncRead + Unpin,
{
    let mut segmenter = LineSegmenter::new();
    let mut buf = vec![0u8; READ_CHUNK];

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(run_id, %stream, error = %e, "pipe read error; treating as end of stream");
                break;
            }
        };

        let lines = segmenter.push(&buf[..n]);
        if lines.is_empty() {
            continue;
        }
        if batch_tx.send(OutputBatch { stream, lines }).await.is_err() {
            debug!(run_id, %stream, "parse worker gone; stopping reader");
            return;
        }
    }

    if let Some(last) = segmenter.finish() {
        let _ = batch_tx
            .send(OutputBatch {
                stream,
                lines: vec![last],
            })
            .await;
    }
}
