//! process/chain.rs
//! Multi-stage pipelines: `prog0 | prog1 | ... | progN > final_writer`.

use std::process::ChildStdin;

use log::{debug, warn};

use crate::process::exec::ProgramSpec;
use crate::process::pipe::{Downstream, PipeWriter, Stage};
use crate::stream::closer::WriteCloser;
use crate::types::{keep_first, Result, StreamError};

/// Run `specs` as one pipeline whose output goes to `final_writer`.
///
/// Stages are spawned from the last program back to the first, each one
/// writing into the stdin of the stage after it. Only the first stage's
/// stdin is returned. Closing it waits for every stage, head to tail, and
/// reports the first failure while still waiting on the rest.
///
/// If a stage fails to spawn, the stages already running are drained and
/// reaped before the error is returned.
pub fn chain_to_writer(final_writer: impl Into<Downstream>, specs: &[ProgramSpec]) -> Result<PipeWriter> {
    if specs.is_empty() {
        return Err(StreamError::Config("pipeline needs at least one program".into()));
    }

    // Construction order: tail first.
    let mut stages: Vec<Stage> = Vec::with_capacity(specs.len());
    let mut sink = Some(final_writer.into());
    let mut head: Option<ChildStdin> = None;

    for spec in specs.iter().rev() {
        let downstream = match head.take() {
            Some(stdin) => Downstream::Stage(stdin),
            None => match sink.take() {
                Some(sink) => sink,
                None => return Err(StreamError::Config("pipeline sink already consumed".into())),
            },
        };

        match Stage::spawn_writer(downstream, spec) {
            Ok((stage, stdin)) => {
                stages.push(stage);
                head = Some(stdin);
            }
            Err(e) => {
                // The failed spawn dropped the next stage's stdin, so the
                // running stages see end-of-input and can be reaped.
                reap(stages);
                return Err(e);
            }
        }
    }

    let Some(head) = head else {
        return Err(StreamError::Config("pipeline has no head stage".into()));
    };
    debug!("pipeline of {} stage(s) started", stages.len());

    Ok(WriteCloser::with_action(head, move |stdin| {
        drop(stdin);
        let mut first = None;
        for stage in stages.into_iter().rev() {
            keep_first(&mut first, stage.wait());
        }
        first.map_or(Ok(()), Err)
    }))
}

/// Convenience over [`chain_to_writer`] taking argv-style commands.
pub fn chain_argv_to_writer<S: AsRef<str>>(
    final_writer: impl Into<Downstream>,
    commands: &[Vec<S>],
) -> Result<PipeWriter> {
    let specs = commands
        .iter()
        .map(|argv| ProgramSpec::from_argv(argv))
        .collect::<Result<Vec<_>>>()?;
    chain_to_writer(final_writer, &specs)
}

fn reap(stages: Vec<Stage>) {
    for stage in stages.into_iter().rev() {
        if let Err(e) = stage.wait() {
            warn!("reaping stage after failed pipeline construction: {e}");
        }
    }
}
