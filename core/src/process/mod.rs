//! process/mod.rs
//! External programs as stream layers.
//!
//! Responsibilities:
//! - Locate and launch programs, wiring stdin/stdout as pipes
//! - Chain programs into pipelines
//! - Collect exit status at close time
//!
//! Non-responsibilities:
//! - Timeouts or cancellation (close blocks until the process exits)

pub mod chain;
pub mod exec;
pub mod exit;
pub mod pipe;

pub use chain::{chain_argv_to_writer, chain_to_writer};
pub use exec::{find_executable, find_executable_in, ProgramSpec};
pub use pipe::{spawn_pipe_reader, spawn_pipe_writer, Downstream, PipeReader, PipeWriter, Upstream};
