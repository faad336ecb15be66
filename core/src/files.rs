//! files.rs
//! Path-driven entry points: open or create a file with the compression
//! layer picked from its suffix.

use std::fs::File;
use std::io;
use std::path::Path;

use log::debug;

use crate::compression::registry::{compression_layer, decompression_layer};
use crate::compression::types::Codec;
use crate::config::StreamConfig;
use crate::process::pipe::{Downstream, Upstream};
use crate::stream::buffer::apply_policy;
use crate::stream::named::{NamedReader, NamedWriter};
use crate::types::{Result, StreamError};

/// Token after the last `.` of the whole path string.
///
/// `None` when there is no `.` or it is the final character. Directory dots
/// count too: `dir.v2/file` yields `v2/file`, which matches no codec.
pub fn suffix_of(path: impl AsRef<Path>) -> Option<String> {
    let text = path.as_ref().to_string_lossy();
    let (_, suffix) = text.rsplit_once('.')?;
    if suffix.is_empty() {
        None
    } else {
        Some(suffix.to_string())
    }
}

fn codec_for(path: &Path) -> Option<Codec> {
    suffix_of(path).and_then(|s| Codec::from_suffix(&s).ok())
}

fn with_path(path: &Path, e: io::Error) -> StreamError {
    StreamError::Io(io::Error::new(e.kind(), format!("{}: {e}", path.display())))
}

/// Create (or truncate) `path` with the default 16 KiB write buffer.
pub fn create_file(path: impl AsRef<Path>) -> Result<NamedWriter> {
    create_file_buffered(path, 0)
}

/// Create `path` with no buffering layer; every write reaches the codec
/// (or file) immediately.
pub fn create_file_sync(path: impl AsRef<Path>) -> Result<NamedWriter> {
    create_file_buffered(path, -1)
}

/// Create `path` with a write buffer of `size` bytes.
///
/// Negative means unbuffered, zero means the default size.
pub fn create_file_buffered(path: impl AsRef<Path>, size: isize) -> Result<NamedWriter> {
    create_file_with(path, &StreamConfig::with_buffer_size(size))
}

/// Create `path` and stack, bottom to top: file, compression layer (if the
/// suffix names a codec), buffer layer (per `config.buffer`).
///
/// Closing the result flushes the buffer, finishes the codec, then closes
/// the file. An unknown suffix just means no compression.
pub fn create_file_with(path: impl AsRef<Path>, config: &StreamConfig) -> Result<NamedWriter> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| with_path(path, e))?;

    let layered = match codec_for(path) {
        Some(codec) => compression_layer(codec, Downstream::File(file), config)?,
        None => Downstream::File(file).into_write_closer(),
    };
    debug!("created {} ({:?})", path.display(), config.buffer);

    Ok(NamedWriter::from_write_closer(
        path.to_string_lossy(),
        apply_policy(layered, config.buffer),
    ))
}

/// Open `path` read-only, decompressing per its suffix.
pub fn open_file(path: impl AsRef<Path>) -> Result<NamedReader> {
    open_file_with(path, &StreamConfig::default())
}

pub fn open_file_with(path: impl AsRef<Path>, config: &StreamConfig) -> Result<NamedReader> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| with_path(path, e))?;

    let layered = match codec_for(path) {
        Some(codec) => decompression_layer(codec, Upstream::File(file), config)?,
        None => Upstream::File(file).into_read_closer(),
    };
    debug!("opened {}", path.display());

    Ok(NamedReader::from_read_closer(path.to_string_lossy(), layered))
}
