//! process/pipe.rs
//! Single-stage pipe engine: run one external program with one end of it
//! exposed as a closable stream.
//!
//! OS handles (files, another stage's pipe) are given to the child directly.
//! An in-process stream on the far side is fed by a copy thread that is joined,
//! and the stream closed, once the child has exited.

use std::fs::File;
use std::io::{self, Write};
use std::process::{Child, ChildStdin, ChildStdout, Stdio};
use std::thread::{self, JoinHandle};

use log::debug;

use crate::process::exec::ProgramSpec;
use crate::process::exit::{check_status, drain_first_line};
use crate::stream::closer::{BoxReadCloser, BoxWriteCloser, Close, ReadCloser, WriteCloser};
use crate::types::{keep_first, Result, StreamError};

/// Closable writer feeding a process's stdin.
pub type PipeWriter = WriteCloser<ChildStdin>;
/// Closable reader draining a process's stdout.
pub type PipeReader = ReadCloser<ChildStdout>;

// ============================================================
// Endpoints
// ============================================================

/// Where a process's standard output goes.
pub enum Downstream {
    File(File),
    /// Standard input of another running stage.
    Stage(ChildStdin),
    /// Any closable writer; fed by a copy thread, closed after the process exits.
    Writer(BoxWriteCloser),
}

impl Downstream {
    fn into_stdio(self) -> (Stdio, Option<BoxWriteCloser>) {
        match self {
            Downstream::File(file) => (Stdio::from(file), None),
            Downstream::Stage(stdin) => (Stdio::from(stdin), None),
            Downstream::Writer(writer) => (Stdio::piped(), Some(writer)),
        }
    }

    /// View this endpoint as a plain closable writer (for in-process layers).
    pub fn into_write_closer(self) -> BoxWriteCloser {
        match self {
            Downstream::File(file) => WriteCloser::from_writer(file).boxed(),
            Downstream::Stage(stdin) => WriteCloser::from_writer(stdin).boxed(),
            Downstream::Writer(writer) => writer,
        }
    }
}

impl From<File> for Downstream {
    fn from(file: File) -> Self {
        Downstream::File(file)
    }
}

impl From<ChildStdin> for Downstream {
    fn from(stdin: ChildStdin) -> Self {
        Downstream::Stage(stdin)
    }
}

impl From<BoxWriteCloser> for Downstream {
    fn from(writer: BoxWriteCloser) -> Self {
        Downstream::Writer(writer)
    }
}

/// Where a process's standard input comes from.
pub enum Upstream {
    File(File),
    /// Standard output of another running stage.
    Stage(ChildStdout),
    /// Any closable reader; pumped by a copy thread, closed after the process exits.
    Reader(BoxReadCloser),
}

impl Upstream {
    fn into_stdio(self) -> (Stdio, Option<BoxReadCloser>) {
        match self {
            Upstream::File(file) => (Stdio::from(file), None),
            Upstream::Stage(stdout) => (Stdio::from(stdout), None),
            Upstream::Reader(reader) => (Stdio::piped(), Some(reader)),
        }
    }

    /// View this endpoint as a plain closable reader (for in-process layers).
    pub fn into_read_closer(self) -> BoxReadCloser {
        match self {
            Upstream::File(file) => ReadCloser::from_reader(file).boxed(),
            Upstream::Stage(stdout) => ReadCloser::from_reader(stdout).boxed(),
            Upstream::Reader(reader) => reader,
        }
    }
}

impl From<File> for Upstream {
    fn from(file: File) -> Self {
        Upstream::File(file)
    }
}

impl From<ChildStdout> for Upstream {
    fn from(stdout: ChildStdout) -> Self {
        Upstream::Stage(stdout)
    }
}

impl From<BoxReadCloser> for Upstream {
    fn from(reader: BoxReadCloser) -> Self {
        Upstream::Reader(reader)
    }
}

// ============================================================
// Stage
// ============================================================

/// Copy thread between the child and an in-process stream.
enum Pump {
    Output(JoinHandle<(BoxWriteCloser, io::Result<u64>)>),
    Input(JoinHandle<(BoxReadCloser, io::Result<u64>)>),
}

impl Pump {
    fn finish(self) -> Result<()> {
        let mut first = None;
        match self {
            Pump::Output(handle) => {
                let (mut writer, copied) = join(handle)?;
                keep_first(&mut first, copied.map(drop).map_err(Into::into));
                keep_first(&mut first, writer.flush().map_err(Into::into));
                keep_first(&mut first, writer.close());
            }
            Pump::Input(handle) => {
                let (mut reader, copied) = join(handle)?;
                // The child may legitimately stop reading early.
                let copied = match copied {
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(0),
                    other => other,
                };
                keep_first(&mut first, copied.map(drop).map_err(Into::into));
                keep_first(&mut first, reader.close());
            }
        }
        first.map_or(Ok(()), Err)
    }
}

fn join<T>(handle: JoinHandle<T>) -> Result<T> {
    handle
        .join()
        .map_err(|_| StreamError::Io(io::Error::new(io::ErrorKind::Other, "pipe copy thread panicked")))
}

/// A launched process plus the helper threads attached to it.
///
/// The stage is consumed by [`Stage::wait`], which is the only place its
/// exit status is collected.
pub(crate) struct Stage {
    command: String,
    child: Child,
    stderr: Option<JoinHandle<Option<String>>>,
    pump: Option<Pump>,
}

impl Stage {
    fn launch(spec: &ProgramSpec, stdin: Stdio, stdout: Stdio) -> Result<Self> {
        let command = spec.to_string();
        // The Command (and the parent's copies of the handed-over handles)
        // is dropped on return, so the child holds the only references.
        let mut child = spec
            .command()
            .stdin(stdin)
            .stdout(stdout)
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(spec, e))?;
        debug!("spawned `{command}` (pid {})", child.id());

        let stderr = child.stderr.take().map(drain_first_line);
        Ok(Self { command, child, stderr, pump: None })
    }

    /// Start a process whose stdout goes to `downstream`; returns its stdin.
    pub(crate) fn spawn_writer(downstream: Downstream, spec: &ProgramSpec) -> Result<(Self, ChildStdin)> {
        let (stdout, sink) = downstream.into_stdio();
        let mut stage = match Self::launch(spec, Stdio::piped(), stdout) {
            Ok(stage) => stage,
            Err(e) => {
                release_writer(sink);
                return Err(e);
            }
        };

        if let Some(mut writer) = sink {
            let Some(mut out) = stage.child.stdout.take() else {
                release_writer(Some(writer));
                return Err(stage.abort("stdout pipe missing"));
            };
            stage.pump = Some(Pump::Output(thread::spawn(move || {
                let copied = io::copy(&mut out, &mut writer);
                (writer, copied)
            })));
        }

        match stage.child.stdin.take() {
            Some(stdin) => Ok((stage, stdin)),
            None => Err(stage.abort("stdin pipe missing")),
        }
    }

    /// Start a process whose stdin comes from `upstream`; returns its stdout.
    pub(crate) fn spawn_reader(upstream: Upstream, spec: &ProgramSpec) -> Result<(Self, ChildStdout)> {
        let (stdin, source) = upstream.into_stdio();
        let mut stage = match Self::launch(spec, stdin, Stdio::piped()) {
            Ok(stage) => stage,
            Err(e) => {
                release_reader(source);
                return Err(e);
            }
        };

        if let Some(mut reader) = source {
            let Some(mut input) = stage.child.stdin.take() else {
                release_reader(Some(reader));
                return Err(stage.abort("stdin pipe missing"));
            };
            stage.pump = Some(Pump::Input(thread::spawn(move || {
                let copied = io::copy(&mut reader, &mut input);
                // Dropping the pipe signals end-of-input to the child.
                drop(input);
                (reader, copied)
            })));
        }

        match stage.child.stdout.take() {
            Some(stdout) => Ok((stage, stdout)),
            None => Err(stage.abort("stdout pipe missing")),
        }
    }

    /// Block until the process exits, then settle its helper threads.
    /// The exit status takes precedence over copy or close failures.
    pub(crate) fn wait(mut self) -> Result<()> {
        let status = self.child.wait();
        let diagnostic = self.stderr.take().and_then(|h| h.join().ok()).flatten();
        debug!("`{}` exited: {:?}", self.command, status);

        let mut first = None;
        keep_first(
            &mut first,
            status.map_err(Into::into).and_then(|s| check_status(&self.command, s, diagnostic)),
        );
        if let Some(pump) = self.pump.take() {
            keep_first(&mut first, pump.finish());
        }
        first.map_or(Ok(()), Err)
    }

    /// Kill and reap a stage that could not be fully wired.
    fn abort(mut self, why: &str) -> StreamError {
        let _ = self.child.kill();
        let _ = self.child.wait();
        StreamError::Spawn {
            command: self.command,
            source: io::Error::new(io::ErrorKind::Other, why.to_string()),
        }
    }
}

fn spawn_error(spec: &ProgramSpec, e: io::Error) -> StreamError {
    if e.kind() == io::ErrorKind::NotFound {
        StreamError::ExecutableNotFound {
            program: spec.program.display().to_string(),
            searched: Vec::new(),
        }
    } else {
        StreamError::Spawn { command: spec.to_string(), source: e }
    }
}

fn release_writer(writer: Option<BoxWriteCloser>) {
    if let Some(mut writer) = writer {
        if let Err(e) = writer.close() {
            log::warn!("closing downstream after failed spawn: {e}");
        }
    }
}

fn release_reader(reader: Option<BoxReadCloser>) {
    if let Some(mut reader) = reader {
        if let Err(e) = reader.close() {
            log::warn!("closing upstream after failed spawn: {e}");
        }
    }
}

// ============================================================
// Public entry points
// ============================================================

/// Launch `spec` with its stdout connected to `downstream` and return its stdin.
///
/// Returns once the process has started. Closing the writer closes the
/// process's stdin and blocks until it exits; a non-zero exit becomes
/// [`StreamError::Exit`].
pub fn spawn_pipe_writer(downstream: impl Into<Downstream>, spec: &ProgramSpec) -> Result<PipeWriter> {
    let (stage, stdin) = Stage::spawn_writer(downstream.into(), spec)?;
    Ok(WriteCloser::with_action(stdin, move |stdin| {
        drop(stdin);
        stage.wait()
    }))
}

/// Launch `spec` with its stdin fed from `upstream` and return its stdout.
///
/// Closing the reader closes the process's stdout and blocks until it exits.
pub fn spawn_pipe_reader(upstream: impl Into<Upstream>, spec: &ProgramSpec) -> Result<PipeReader> {
    let (stage, stdout) = Stage::spawn_reader(upstream.into(), spec)?;
    Ok(ReadCloser::with_action(stdout, move |stdout| {
        drop(stdout);
        stage.wait()
    }))
}
