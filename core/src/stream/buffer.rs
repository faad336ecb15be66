//! stream/buffer.rs
//! Write buffering whose flush is tied into the close chain.

use std::io::{BufWriter, Write};

use crate::config::BufferPolicy;
use crate::stream::closer::{BoxWriteCloser, WriteClose, WriteCloser};
use crate::types::keep_first;

/// Buffer writes to `inner` with `size` bytes of capacity.
///
/// Close order: flush the buffer into `inner`, then close `inner`. The close
/// of `inner` is attempted even when the flush fails; the flush error wins.
pub fn add_buffer<W>(inner: W, size: usize) -> WriteCloser<BufWriter<W>>
where
    W: WriteClose + 'static,
{
    WriteCloser::with_action(BufWriter::with_capacity(size, inner), |mut buffered: BufWriter<W>| {
        let mut first = None;
        keep_first(&mut first, buffered.flush().map_err(Into::into));
        // Anything still buffered after a failed flush is discarded here.
        let (mut inner, _unflushed) = buffered.into_parts();
        keep_first(&mut first, inner.close());
        first.map_or(Ok(()), Err)
    })
}

/// Apply a [`BufferPolicy`]: unbuffered returns `inner` untouched.
pub fn apply_policy(inner: BoxWriteCloser, policy: BufferPolicy) -> BoxWriteCloser {
    match policy.capacity() {
        Some(size) => add_buffer(inner, size).boxed(),
        None => inner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::closer::Close;
    use crate::stream::io::SharedBuffer;
    use crate::types::StreamError;
    use std::io;
    use std::sync::{Arc, Mutex};

    struct FailingFlush;

    impl Write for FailingFlush {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn close_flushes_then_closes_inner() {
        let shared = SharedBuffer::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let log = order.clone();
        let probe = shared.clone();
        let inner = WriteCloser::with_action(shared.writer(), move |_| {
            log.lock().unwrap().push(probe.contents().len());
            Ok(())
        });

        let mut w = add_buffer(inner, 64);
        w.write_all(b"0123456789").unwrap();
        assert!(shared.contents().is_empty(), "small write should still be buffered");
        w.close().unwrap();

        assert_eq!(shared.contents(), b"0123456789");
        assert_eq!(*order.lock().unwrap(), vec![10], "inner closed after flush");
    }

    #[test]
    fn flush_error_wins_but_inner_still_closed() {
        let closed = Arc::new(Mutex::new(false));
        let flag = closed.clone();
        let inner = WriteCloser::with_action(FailingFlush, move |_| {
            *flag.lock().unwrap() = true;
            Err(StreamError::Config("close failed".into()))
        });

        let mut w = add_buffer(inner, 16);
        w.write_all(b"pending").unwrap();
        let err = w.close().unwrap_err();

        assert!(matches!(err, StreamError::Io(_)), "flush error reported first, got {err}");
        assert!(*closed.lock().unwrap());
    }

    #[test]
    fn unbuffered_policy_passes_writes_through() {
        let shared = SharedBuffer::new();
        let mut w = apply_policy(WriteCloser::from_writer(shared.writer()).boxed(), BufferPolicy::Unbuffered);
        w.write_all(b"now").unwrap();
        assert_eq!(shared.contents(), b"now");
        w.close().unwrap();
    }
}
