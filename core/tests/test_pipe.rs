#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read, Write};

    use pipestream_core::process::{find_executable, spawn_pipe_reader, spawn_pipe_writer, ProgramSpec};
    use pipestream_core::stream::{Close, ReadCloser, SharedBuffer};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn have(program: &str) -> bool {
        match find_executable(program) {
            Ok(_) => true,
            Err(e) => {
                eprintln!("skipping: {e}");
                false
            }
        }
    }

    #[test]
    fn test_writer_output_reaches_sink_after_close() {
        init();
        if !have("cat") {
            return;
        }
        let shared = SharedBuffer::new();
        let mut w = spawn_pipe_writer(shared.write_closer(), &ProgramSpec::new("cat")).unwrap();
        w.write_all(b"through cat\n").unwrap();
        w.close().unwrap();
        assert_eq!(shared.contents(), b"through cat\n");
    }

    #[test]
    fn test_reader_drains_program_output() {
        init();
        if !have("tr") {
            return;
        }
        let source = ReadCloser::from_reader(Cursor::new(b"abc".to_vec())).boxed();
        let mut r = spawn_pipe_reader(source, &ProgramSpec::new("tr").args(["a-z", "A-Z"])).unwrap();
        let mut out = String::new();
        r.read_to_string(&mut out).unwrap();
        r.close().unwrap();
        assert_eq!(out, "ABC");
    }

    #[test]
    fn test_nonzero_exit_surfaces_on_close() {
        init();
        if !have("false") {
            return;
        }
        let mut w = spawn_pipe_writer(SharedBuffer::new().write_closer(), &ProgramSpec::new("false")).unwrap();
        let err = w.close().unwrap_err();
        assert_eq!(err.exit_code(), Some(1));
        assert!(err.to_string().contains("process exited with code 1"));
    }

    #[test]
    fn test_stderr_first_line_is_reported() {
        init();
        if !have("sh") {
            return;
        }
        let spec = ProgramSpec::new("sh").args(["-c", "echo first >&2; echo second >&2; exit 3"]);
        let mut w = spawn_pipe_writer(SharedBuffer::new().write_closer(), &spec).unwrap();
        let err = w.close().unwrap_err();
        assert_eq!(err.exit_code(), Some(3));
        let message = err.to_string();
        assert!(message.ends_with("process exited with code 3: first"), "{message}");
    }

    #[test]
    fn test_missing_program_is_not_found() {
        init();
        let spec = ProgramSpec::new("no-such-program-4c1e");
        let err = spawn_pipe_writer(SharedBuffer::new().write_closer(), &spec).err().unwrap();
        assert!(err.is_executable_not_found());
        let err = spawn_pipe_reader(ReadCloser::from_reader(Cursor::new(Vec::new())).boxed(), &spec).err().unwrap();
        assert!(err.is_executable_not_found());
    }
}
