/// Suffix tokens recognised by the codec table (case-sensitive).
pub mod suffixes {
    pub const GZIP: &[&str] = &["gz", "gzip"];
    pub const BZIP2: &[&str] = &["bz2", "bzip2"];
    pub const XZ: &[&str] = &["xz"];
}

/// External program arguments for subprocess-backed codecs.
pub mod args {
    pub const BZIP2_COMPRESS: &[&str] = &["-z", "-c"];
    pub const XZ_COMPRESS: &[&str] = &["-z", "-e", "-c"];
    pub const XZ_DECOMPRESS: &[&str] = &["-d", "-c"];
}
