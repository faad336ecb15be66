#[cfg(test)]
mod tests {
    use std::io::Write;

    use pipestream_core::config::BufferPolicy;
    use pipestream_core::stream::{add_buffer, apply_policy, Close, SharedBuffer};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_buffered_writes_land_on_close() {
        init();
        let shared = SharedBuffer::new();
        let mut w = add_buffer(shared.write_closer(), 64);
        w.write_all(b"held back").unwrap();
        assert!(shared.contents().is_empty());
        w.close().unwrap();
        assert_eq!(shared.contents(), b"held back");
    }

    #[test]
    fn test_default_policy_handles_writes_larger_than_buffer() {
        init();
        let shared = SharedBuffer::new();
        let mut w = apply_policy(shared.write_closer(), BufferPolicy::from_size(0));
        let big: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        w.write_all(&big).unwrap();
        w.close().unwrap();
        assert_eq!(shared.contents(), big);
    }

    #[test]
    fn test_unbuffered_writes_are_visible_immediately() {
        init();
        let shared = SharedBuffer::new();
        let mut w = apply_policy(shared.write_closer(), BufferPolicy::from_size(-1));
        w.write_all(b"now").unwrap();
        assert_eq!(shared.contents(), b"now");
        w.close().unwrap();
    }
}
