//! compression/registry.rs
//! Suffix → codec dispatch for compression and decompression layers.

use log::debug;

use crate::compression::codecs::{bzip2_reader, bzip2_writer, gzip_reader, gzip_writer, xz_reader, xz_writer};
use crate::compression::types::Codec;
use crate::config::StreamConfig;
use crate::process::pipe::{Downstream, Upstream};
use crate::stream::closer::{BoxReadCloser, BoxWriteCloser};
use crate::types::Result;

/// Wrap `sink` so that bytes written are compressed per `suffix`.
///
/// | suffix        | method                          |
/// |---------------|---------------------------------|
/// | `gz`, `gzip`  | in-process, maximum level       |
/// | `bz2`, `bzip2`| external `bzip2 -z -c`          |
/// | `xz`          | external `xz -z -e -c`          |
///
/// Anything else fails with [`StreamError::UnknownSuffix`](crate::types::StreamError::UnknownSuffix).
/// Closing the returned writer shuts the codec down, then closes `sink`.
pub fn add_compression(sink: impl Into<Downstream>, suffix: &str) -> Result<BoxWriteCloser> {
    add_compression_with(sink, suffix, &StreamConfig::default())
}

pub fn add_compression_with(sink: impl Into<Downstream>, suffix: &str, config: &StreamConfig) -> Result<BoxWriteCloser> {
    let codec = Codec::from_suffix(suffix)?;
    compression_layer(codec, sink.into(), config)
}

/// Wrap `source` so that bytes read are decompressed per `suffix`.
///
/// gzip and bzip2 decode in-process; xz runs `xz -d -c`.
/// Closing the returned reader shuts the codec down, then closes `source`.
pub fn add_decompression(source: impl Into<Upstream>, suffix: &str) -> Result<BoxReadCloser> {
    add_decompression_with(source, suffix, &StreamConfig::default())
}

pub fn add_decompression_with(source: impl Into<Upstream>, suffix: &str, config: &StreamConfig) -> Result<BoxReadCloser> {
    let codec = Codec::from_suffix(suffix)?;
    decompression_layer(codec, source.into(), config)
}

pub fn compression_layer(codec: Codec, sink: Downstream, config: &StreamConfig) -> Result<BoxWriteCloser> {
    debug!("adding {codec} compression layer");
    match codec {
        Codec::Gzip => Ok(gzip_writer(sink.into_write_closer(), config.gzip_level())),
        Codec::Bzip2 => bzip2_writer(sink, &config.executable_dirs),
        Codec::Xz => xz_writer(sink, &config.executable_dirs),
    }
}

pub fn decompression_layer(codec: Codec, source: Upstream, config: &StreamConfig) -> Result<BoxReadCloser> {
    debug!("adding {codec} decompression layer");
    match codec {
        Codec::Gzip => gzip_reader(source.into_read_closer()),
        Codec::Bzip2 => Ok(bzip2_reader(source.into_read_closer())),
        Codec::Xz => xz_reader(source, &config.executable_dirs),
    }
}
