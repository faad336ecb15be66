//! compression/mod.rs
//! Suffix-selected compression and decompression layers.
//!
//! - A suffix token maps to exactly one [`Codec`]; unknown tokens are a
//!   distinct, recoverable error.
//! - Each layer owns the stream beneath it and closes it last.

pub mod codecs;
pub mod constants;
pub mod registry;
pub mod types;

pub use registry::*;
pub use types::Codec;
