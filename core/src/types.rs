use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StreamError>;

/// Unified stream error covering I/O, codec selection, process start and exit.
/// - Construction failures never hand back a partially built stream.
/// - Close-time failures carry enough context to name the failing command.
#[derive(Debug, Error)]
pub enum StreamError {
    /// I/O error on an underlying handle or pipe.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The suffix token does not name a known codec.
    #[error("unknown suffix: {suffix:?}")]
    UnknownSuffix { suffix: String },

    /// An in-process codec refused to start (e.g. malformed header).
    #[error("couldn't create {codec} codec: {source}")]
    CodecInit {
        codec: &'static str,
        #[source]
        source: io::Error,
    },

    /// The program is not present in any searched location.
    #[error("could not find executable {program} (searched {searched:?})")]
    ExecutableNotFound {
        program: String,
        searched: Vec<PathBuf>,
    },

    /// The program was found but could not be started or wired up.
    #[error("couldn't start process {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("{command}: {}", exit_message(.code, .diagnostic))]
    Exit {
        command: String,
        code: Option<i32>,
        diagnostic: Option<String>,
    },

    /// Invalid configuration or arguments.
    #[error("configuration error: {0}")]
    Config(String),
}

fn exit_message(code: &Option<i32>, diagnostic: &Option<String>) -> String {
    let head = match code {
        Some(code) => format!("process exited with code {code}"),
        None => "process terminated by signal".to_string(),
    };
    match diagnostic {
        Some(line) => format!("{head}: {line}"),
        None => head,
    }
}

impl StreamError {
    pub fn is_unknown_suffix(&self) -> bool {
        matches!(self, StreamError::UnknownSuffix { .. })
    }

    pub fn is_executable_not_found(&self) -> bool {
        matches!(self, StreamError::ExecutableNotFound { .. })
    }

    /// Exit code of a failed process, if this is an exit failure.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            StreamError::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(inner) => inner,
            StreamError::ExecutableNotFound { .. } => io::Error::new(io::ErrorKind::NotFound, e),
            other => io::Error::new(io::ErrorKind::Other, other),
        }
    }
}

/// Keep the first failure, log and drop any later one.
pub(crate) fn keep_first(first: &mut Option<StreamError>, next: Result<()>) {
    if let Err(e) = next {
        match first {
            None => *first = Some(e),
            Some(kept) => log::warn!("discarding secondary close error ({e}); keeping: {kept}"),
        }
    }
}
