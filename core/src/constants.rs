/// Buffer size used when a caller asks for the default (size 0).
pub const DEFAULT_BUFFER_SIZE: usize = 16 * 1024; // 16 KiB

/// Fixed search order for codec executables.
pub const EXECUTABLE_DIRS: &[&str] = &["/bin", "/usr/bin", "/usr/local/bin"];

/// Maximum gzip level; the default for compression layers.
pub const GZIP_BEST_LEVEL: u32 = 9;

/// Longest stderr line kept for exit diagnostics.
pub const MAX_DIAGNOSTIC_LEN: usize = 4096;

/// Leading bytes produced by each codec.
pub mod magic {
    pub const GZIP: &[u8] = &[0x1F, 0x8B];
    pub const BZIP2: &[u8] = b"BZh";
    pub const XZ: &[u8] = &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
}
