//! config.rs
//! Caller-tunable knobs for file creation and codec process lookup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BUFFER_SIZE, EXECUTABLE_DIRS, GZIP_BEST_LEVEL};
use crate::types::{Result, StreamError};

/// Whether, and how much, to buffer writes on top of the codec layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferPolicy {
    /// No buffering layer at all; writes go straight down.
    Unbuffered,
    /// Buffer with [`DEFAULT_BUFFER_SIZE`].
    Default,
    /// Buffer with exactly this many bytes.
    Size(usize),
}

impl BufferPolicy {
    /// Map a raw signed size: negative => unbuffered, zero => default, positive => verbatim.
    pub fn from_size(size: isize) -> Self {
        match size {
            s if s < 0 => BufferPolicy::Unbuffered,
            0 => BufferPolicy::Default,
            s => BufferPolicy::Size(s as usize),
        }
    }

    /// Effective capacity, or `None` when no buffer layer is wanted.
    pub fn capacity(&self) -> Option<usize> {
        match *self {
            BufferPolicy::Unbuffered => None,
            BufferPolicy::Default | BufferPolicy::Size(0) => Some(DEFAULT_BUFFER_SIZE),
            BufferPolicy::Size(n) => Some(n),
        }
    }
}

impl Default for BufferPolicy {
    fn default() -> Self {
        BufferPolicy::Default
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Buffering applied by the file creation entry points.
    pub buffer: BufferPolicy,

    /// Ordered directories searched for codec executables (`bzip2`, `xz`).
    pub executable_dirs: Vec<PathBuf>,

    /// gzip level for compression layers; clamped to 0..=9.
    pub gzip_level: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            buffer: BufferPolicy::Default,
            executable_dirs: EXECUTABLE_DIRS.iter().map(PathBuf::from).collect(),
            gzip_level: GZIP_BEST_LEVEL,
        }
    }
}

impl StreamConfig {
    pub fn with_buffer_size(size: isize) -> Self {
        Self { buffer: BufferPolicy::from_size(size), ..Self::default() }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| StreamError::Config(e.to_string()))
    }

    pub fn gzip_level(&self) -> u32 {
        self.gzip_level.min(GZIP_BEST_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_policy_from_raw_size() {
        assert_eq!(BufferPolicy::from_size(-1), BufferPolicy::Unbuffered);
        assert_eq!(BufferPolicy::from_size(-4096), BufferPolicy::Unbuffered);
        assert_eq!(BufferPolicy::from_size(0), BufferPolicy::Default);
        assert_eq!(BufferPolicy::from_size(32), BufferPolicy::Size(32));
    }

    #[test]
    fn buffer_policy_capacity() {
        assert_eq!(BufferPolicy::Unbuffered.capacity(), None);
        assert_eq!(BufferPolicy::Default.capacity(), Some(16 * 1024));
        assert_eq!(BufferPolicy::Size(32).capacity(), Some(32));
    }

    #[test]
    fn defaults_search_standard_dirs() {
        let cfg = StreamConfig::default();
        assert_eq!(
            cfg.executable_dirs,
            vec![PathBuf::from("/bin"), PathBuf::from("/usr/bin"), PathBuf::from("/usr/local/bin")]
        );
        assert_eq!(cfg.gzip_level(), 9);
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let cfg = StreamConfig::from_json(r#"{ "buffer": { "size": 64 }, "gzip_level": 42 }"#).unwrap();
        assert_eq!(cfg.buffer, BufferPolicy::Size(64));
        assert_eq!(cfg.gzip_level(), 9);
        assert_eq!(cfg.executable_dirs.len(), 3);

        let cfg = StreamConfig::from_json(r#"{ "buffer": "unbuffered" }"#).unwrap();
        assert_eq!(cfg.buffer, BufferPolicy::Unbuffered);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(StreamConfig::from_json("{ nope"), Err(StreamError::Config(_))));
    }
}
