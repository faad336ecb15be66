//! gzip via flate2, streaming in both directions.

use std::io::{self, Cursor, Read, Write};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::constants::magic;
use crate::stream::closer::{BoxReadCloser, BoxWriteCloser, Close, ReadCloser, WriteCloser};
use crate::types::{keep_first, Result, StreamError};

const CODEC: &str = "gzip";

/// Compress into `sink` at `level`.
///
/// Close order: flush the encoder, finish the gzip trailer, close `sink`.
pub fn gzip_writer(sink: BoxWriteCloser, level: u32) -> BoxWriteCloser {
    let encoder = GzEncoder::new(sink, Compression::new(level));
    WriteCloser::with_action(encoder, |mut encoder: GzEncoder<BoxWriteCloser>| {
        let mut first = None;
        keep_first(&mut first, encoder.flush().map_err(Into::into));
        keep_first(&mut first, encoder.try_finish().map_err(Into::into));
        keep_first(&mut first, encoder.get_mut().close());
        first.map_or(Ok(()), Err)
    })
    .boxed()
}

/// Decompress from `source`. The whole member header is parsed here, so a
/// non-gzip or malformed source fails at construction rather than on first read.
pub fn gzip_reader(mut source: BoxReadCloser) -> Result<BoxReadCloser> {
    let mut head = [0u8; 2];
    let checked = source.read_exact(&mut head).and_then(|_| {
        if head[..] == *magic::GZIP {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::InvalidData, "invalid gzip header"))
        }
    });
    if let Err(e) = checked {
        return Err(init_failed(source, e));
    }

    let decoder = MultiGzDecoder::new(Cursor::new(head).chain(source));
    if decoder.header().is_none() {
        let (_, source) = decoder.into_inner().into_inner();
        return Err(init_failed(
            source,
            io::Error::new(io::ErrorKind::InvalidData, "malformed gzip header"),
        ));
    }

    Ok(ReadCloser::with_action(decoder, |decoder: MultiGzDecoder<_>| {
        let (_, mut source) = decoder.into_inner().into_inner();
        source.close()
    })
    .boxed())
}

fn init_failed(mut source: BoxReadCloser, e: io::Error) -> StreamError {
    if let Err(close_err) = source.close() {
        log::warn!("closing source after gzip init failure: {close_err}");
    }
    StreamError::CodecInit { codec: CODEC, source: e }
}
