//! stream/named.rs
//! Closable streams that carry an immutable label (usually the file path).

use std::fmt;
use std::io::{self, Read, Write};

use crate::stream::closer::{BoxReadCloser, BoxWriteCloser, Close, CloseAction, ReadCloser, WriteCloser};
use crate::types::Result;

/// Anything that can report an identifying name.
pub trait Named {
    fn name(&self) -> &str;
}

/// A closable writer with a name. Closing delegates to the wrapped stream.
pub struct NamedWriter<W = BoxWriteCloser> {
    name: String,
    inner: W,
}

impl<W: Write + Close> NamedWriter<W> {
    pub fn from_write_closer(name: impl Into<String>, inner: W) -> Self {
        Self { name: name.into(), inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }
}

impl<W: Write> NamedWriter<WriteCloser<W>> {
    /// Build from a raw writer plus optional shutdown action.
    pub fn from_writer(name: impl Into<String>, writer: W, action: Option<CloseAction<W>>) -> Self {
        Self::from_write_closer(name, WriteCloser::new(writer, action))
    }
}

impl<W> Named for NamedWriter<W> {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<W: Write> Write for NamedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Close> Close for NamedWriter<W> {
    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}

impl<W> fmt::Debug for NamedWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedWriter").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A closable reader with a name. Closing delegates to the wrapped stream.
pub struct NamedReader<R = BoxReadCloser> {
    name: String,
    inner: R,
}

impl<R: Read + Close> NamedReader<R> {
    pub fn from_read_closer(name: impl Into<String>, inner: R) -> Self {
        Self { name: name.into(), inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl<R: Read> NamedReader<ReadCloser<R>> {
    /// Build from a raw reader plus optional shutdown action.
    pub fn from_reader(name: impl Into<String>, reader: R, action: Option<CloseAction<R>>) -> Self {
        Self::from_read_closer(name, ReadCloser::new(reader, action))
    }
}

impl<R> Named for NamedReader<R> {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<R: Read> Read for NamedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Close> Close for NamedReader<R> {
    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}

impl<R> fmt::Debug for NamedReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedReader").field("name", &self.name).finish_non_exhaustive()
    }
}
