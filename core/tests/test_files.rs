#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{Read, Write};

    use pipestream_core::compression::Codec;
    use pipestream_core::files::{create_file, create_file_buffered, create_file_sync, open_file, open_file_with};
    use pipestream_core::stream::{Close, Named};
    use pipestream_core::{StreamConfig, StreamError};

    const BODY: &str = "line one\nline two\nline three\n";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn skip(e: &StreamError) -> bool {
        if e.is_executable_not_found() {
            eprintln!("skipping: {e}");
            true
        } else {
            false
        }
    }

    #[test]
    fn test_suffix_and_buffer_table() {
        init();
        let dir = tempfile::tempdir().unwrap();

        for suffix in ["bz2", "gz", "xz", "txt"] {
            for size in [0isize, -1, 32] {
                let path = dir.path().join(format!("out_{}.{suffix}", size.unsigned_abs()));
                let mut w = match create_file_buffered(&path, size) {
                    Ok(w) => w,
                    Err(e) if skip(&e) => continue,
                    Err(e) => panic!("create {}: {e}", path.display()),
                };
                assert_eq!(w.name(), path.to_string_lossy());
                w.write_all(BODY.as_bytes()).unwrap();
                w.close().unwrap();

                let raw = fs::read(&path).unwrap();
                match Codec::from_suffix(suffix) {
                    Ok(codec) => assert!(raw.starts_with(codec.magic()), "{suffix} magic"),
                    Err(_) => assert_eq!(raw, BODY.as_bytes()),
                }

                let mut r = match open_file(&path) {
                    Ok(r) => r,
                    Err(e) if skip(&e) => continue,
                    Err(e) => panic!("open {}: {e}", path.display()),
                };
                let mut text = String::new();
                r.read_to_string(&mut text).unwrap();
                r.close().unwrap();
                assert_eq!(text, BODY, "{suffix} with buffer {size}");
            }
        }
    }

    #[test]
    fn test_sync_file_has_bytes_before_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.log");
        let mut w = create_file_sync(&path).unwrap();
        w.write_all(b"early").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"early");
        w.close().unwrap();
    }

    #[test]
    fn test_unknown_suffix_is_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.zip");
        let mut w = create_file(&path).unwrap();
        w.write_all(b"not zipped").unwrap();
        w.close().unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"not zipped");
    }

    #[test]
    fn test_open_non_gzip_with_gz_suffix_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("liar.gz");
        fs::write(&path, b"plain").unwrap();
        assert!(matches!(open_file(&path), Err(StreamError::CodecInit { .. })));

        let empty = dir.path().join("empty.gz");
        fs::write(&empty, b"").unwrap();
        assert!(matches!(open_file(&empty), Err(StreamError::CodecInit { .. })));
    }

    #[test]
    fn test_config_from_json_drives_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xz");
        fs::write(&path, b"irrelevant").unwrap();

        let config = StreamConfig::from_json(r#"{"executable_dirs": ["/nonexistent"]}"#).unwrap();
        let err = open_file_with(&path, &config).err().unwrap();
        assert!(err.is_executable_not_found());
    }
}
