//! stream/io.rs
//! In-memory endpoints for piping into and out of the engine.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::stream::closer::{BoxWriteCloser, WriteCloser};

/// A growable byte buffer shared between a writer handle and an observer.
///
/// Useful as a pipeline sink whose output is inspected after close.
#[derive(Clone, Default, Debug)]
pub struct SharedBuffer {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writer(&self) -> SharedBufferWriter {
        SharedBufferWriter { buf: self.buf.clone() }
    }

    /// Closable writer appending to this buffer; closing is a no-op.
    pub fn write_closer(&self) -> BoxWriteCloser {
        WriteCloser::from_writer(self.writer()).boxed()
    }

    /// Snapshot of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        match self.buf.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

pub struct SharedBufferWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "shared buffer poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::closer::Close;

    #[test]
    fn writes_are_visible_through_clone() {
        let shared = SharedBuffer::new();
        let mut w = shared.write_closer();
        w.write_all(b"abc").unwrap();
        w.close().unwrap();
        assert_eq!(shared.contents(), b"abc");
    }
}
