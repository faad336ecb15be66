//! stream/closer.rs
//! Closable stream capability and the adapters that attach a shutdown action
//! to a plain reader or writer.
//!
//! An adapter owns its inner stream and at most one [`CloseAction`]. Closing
//! hands the inner stream to the action by value, so the action decides the
//! shutdown order of whatever it wraps. After the first close the adapter is
//! spent: further reads/writes fail with `BrokenPipe`, further closes are
//! no-ops.

use std::io::{self, Read, Write};

use crate::types::Result;

/// Shutdown capability shared by every stream layer.
pub trait Close {
    /// Release this layer and everything it exclusively owns.
    fn close(&mut self) -> Result<()>;
}

impl<T: Close + ?Sized> Close for Box<T> {
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// A readable stream with a shutdown action.
pub trait ReadClose: Read + Close + Send {}
impl<T: Read + Close + Send + ?Sized> ReadClose for T {}

/// A writable stream with a shutdown action.
pub trait WriteClose: Write + Close + Send {}
impl<T: Write + Close + Send + ?Sized> WriteClose for T {}

pub type BoxReadCloser = Box<dyn ReadClose>;
pub type BoxWriteCloser = Box<dyn WriteClose>;

/// Deferred shutdown for a stream of type `T`; receives the stream by value.
pub type CloseAction<T> = Box<dyn FnOnce(T) -> Result<()> + Send>;

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "stream already closed")
}

fn run_close<T>(inner: &mut Option<T>, action: &mut Option<CloseAction<T>>) -> Result<()> {
    let Some(stream) = inner.take() else {
        return Ok(());
    };
    match action.take() {
        Some(action) => action(stream),
        None => {
            drop(stream);
            Ok(())
        }
    }
}

// ============================================================
// Writer adapter
// ============================================================

/// Wraps a writer and an optional shutdown action.
pub struct WriteCloser<W> {
    inner: Option<W>,
    action: Option<CloseAction<W>>,
}

impl<W: Write> WriteCloser<W> {
    pub fn new(writer: W, action: Option<CloseAction<W>>) -> Self {
        Self { inner: Some(writer), action }
    }

    /// No shutdown action: closing just drops the writer.
    pub fn from_writer(writer: W) -> Self {
        Self::new(writer, None)
    }

    pub fn with_action<F>(writer: W, action: F) -> Self
    where
        F: FnOnce(W) -> Result<()> + Send + 'static,
    {
        Self::new(writer, Some(Box::new(action)))
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut W> {
        self.inner.as_mut()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    pub fn boxed(self) -> BoxWriteCloser
    where
        W: Send + 'static,
    {
        Box::new(self)
    }
}

impl<W: Write> Write for WriteCloser<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.as_mut().ok_or_else(closed_error)?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.as_mut().ok_or_else(closed_error)?.flush()
    }
}

impl<W> Close for WriteCloser<W> {
    fn close(&mut self) -> Result<()> {
        run_close(&mut self.inner, &mut self.action)
    }
}

impl<W> Drop for WriteCloser<W> {
    fn drop(&mut self) {
        if self.inner.is_some() {
            if let Err(e) = self.close() {
                log::warn!("writer dropped without close; shutdown failed: {e}");
            }
        }
    }
}

// ============================================================
// Reader adapter
// ============================================================

/// Wraps a reader and an optional shutdown action.
pub struct ReadCloser<R> {
    inner: Option<R>,
    action: Option<CloseAction<R>>,
}

impl<R: Read> ReadCloser<R> {
    pub fn new(reader: R, action: Option<CloseAction<R>>) -> Self {
        Self { inner: Some(reader), action }
    }

    pub fn from_reader(reader: R) -> Self {
        Self::new(reader, None)
    }

    pub fn with_action<F>(reader: R, action: F) -> Self
    where
        F: FnOnce(R) -> Result<()> + Send + 'static,
    {
        Self::new(reader, Some(Box::new(action)))
    }

    pub fn get_ref(&self) -> Option<&R> {
        self.inner.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut R> {
        self.inner.as_mut()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    pub fn boxed(self) -> BoxReadCloser
    where
        R: Send + 'static,
    {
        Box::new(self)
    }
}

impl<R: Read> Read for ReadCloser<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.as_mut().ok_or_else(closed_error)?.read(buf)
    }
}

impl<R> Close for ReadCloser<R> {
    fn close(&mut self) -> Result<()> {
        run_close(&mut self.inner, &mut self.action)
    }
}

impl<R> Drop for ReadCloser<R> {
    fn drop(&mut self) {
        if self.inner.is_some() {
            if let Err(e) = self.close() {
                log::warn!("reader dropped without close; shutdown failed: {e}");
            }
        }
    }
}
