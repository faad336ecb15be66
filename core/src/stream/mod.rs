//! stream/mod.rs
//! Closable and named byte streams, plus the write-buffering layer.
//!
//! Layers compose by ownership: each adapter owns exactly one inner stream
//! and closing an adapter closes what it owns, innermost last.

pub mod buffer;
pub mod closer;
pub mod io;
pub mod named;

pub use buffer::{add_buffer, apply_policy};
pub use closer::{
    BoxReadCloser, BoxWriteCloser, Close, CloseAction, ReadClose, ReadCloser, WriteClose, WriteCloser,
};
pub use io::{SharedBuffer, SharedBufferWriter};
pub use named::{Named, NamedReader, NamedWriter};
