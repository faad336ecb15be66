//! compression/codecs/mod.rs
//! One module per format. In-process codecs wrap library encoders/decoders;
//! the rest delegate to an external program through the pipe engine.

pub mod bzip2;
pub mod gzip;
pub mod xz;

pub use self::bzip2::{bzip2_reader, bzip2_writer};
pub use self::gzip::{gzip_reader, gzip_writer};
pub use self::xz::{xz_reader, xz_writer};
