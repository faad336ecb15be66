//! process/exit.rs
//! Exit-status translation and stderr harvesting.

use std::io::{BufRead, BufReader, Read};
use std::process::{ChildStderr, ExitStatus};
use std::thread::{self, JoinHandle};

use crate::constants::MAX_DIAGNOSTIC_LEN;
use crate::types::{Result, StreamError};

/// Drain a child's stderr on a helper thread, keeping only the first line.
///
/// The whole stream is consumed so a chatty child never blocks on a full pipe.
pub(crate) fn drain_first_line(stderr: ChildStderr) -> JoinHandle<Option<String>> {
    thread::spawn(move || first_line(stderr))
}

pub(crate) fn first_line<R: Read>(reader: R) -> Option<String> {
    let mut first = None;
    for line in BufReader::new(reader).split(b'\n') {
        let Ok(line) = line else { break };
        if first.is_none() {
            let text = String::from_utf8_lossy(&line);
            let text = text.trim_end();
            if !text.is_empty() {
                first = Some(truncate(text));
            }
        }
    }
    first
}

fn truncate(text: &str) -> String {
    if text.len() <= MAX_DIAGNOSTIC_LEN {
        return text.to_string();
    }
    let mut end = MAX_DIAGNOSTIC_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// Map a finished process's status to `Ok` or an [`StreamError::Exit`].
pub(crate) fn check_status(command: &str, status: ExitStatus, diagnostic: Option<String>) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(StreamError::Exit {
        command: command.to_string(),
        code: status.code(),
        diagnostic,
    })
}
