//! pipestream-core
//!
//! Closable, layered byte streams for file processing.
//! Compression is chosen by file suffix; external programs act as stream
//! layers and their exit status surfaces at close.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;

// Stream layers
pub mod compression;
pub mod files;
pub mod process;
pub mod stream;

pub use config::{BufferPolicy, StreamConfig};
pub use types::{Result, StreamError};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{add_compression, add_decompression, Codec};
    pub use crate::config::{BufferPolicy, StreamConfig};
    pub use crate::files::{create_file, create_file_buffered, create_file_sync, open_file, suffix_of};
    pub use crate::process::{chain_to_writer, spawn_pipe_reader, spawn_pipe_writer, ProgramSpec};
    pub use crate::stream::{BoxReadCloser, BoxWriteCloser, Close, NamedReader, NamedWriter, ReadCloser, WriteCloser};
    pub use crate::types::{Result, StreamError};
}
