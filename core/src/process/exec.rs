//! process/exec.rs
//! Program specs and executable lookup.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::constants::EXECUTABLE_DIRS;
use crate::types::{Result, StreamError};

/// One external program invocation: executable plus positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ProgramSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// First element is the program, the rest are its arguments.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Result<Self> {
        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| StreamError::Config("empty program spec".into()))?;
        Ok(Self::new(program.as_ref()).args(rest.iter().map(|a| a.as_ref().to_string())))
    }

    pub(crate) fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for ProgramSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Locate `name` in the standard binary directories.
pub fn find_executable(name: &str) -> Result<PathBuf> {
    find_executable_in(name, EXECUTABLE_DIRS)
}

/// Locate `name` in `dirs`, first match wins.
pub fn find_executable_in<P: AsRef<Path>>(name: &str, dirs: &[P]) -> Result<PathBuf> {
    for dir in dirs {
        let candidate = dir.as_ref().join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(StreamError::ExecutableNotFound {
        program: name.to_string(),
        searched: dirs.iter().map(|d| d.as_ref().to_path_buf()).collect(),
    })
}
