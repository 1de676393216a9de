// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for running an engine with
//! `tokio::process::Command`, turning its output into classified events and
//! reporting back to the consumer via `RunEvent`s.
//!
//! - [`supervisor`] owns the process lifecycle (start, stop, kill, exit).
//! - [`stream`] reads the stdout/stderr pipes as data becomes available.
//! - [`segmenter`] splits raw chunks into complete lines.
//! - [`worker`] classifies lines, one batch at a time, off the consumer.
//! - [`dispatch`] is the bounded hand-off from the worker to the consumer.

pub mod dispatch;
pub mod segmenter;
pub mod stream;
pub mod supervisor;
pub mod worker;

pub use dispatch::Dispatcher;
pub use segmenter::LineSegmenter;
pub use stream::{OutputBatch, OutputLine, StreamKind};
pub use supervisor::{
    ExecutionState, RunHandle, StopPolicy, Supervisor, SupervisorOptions, DEFAULT_STOP_TIMEOUT,
};
