//! bzip2: decoded in-process, encoded by the external `bzip2` program.

use ::bzip2::read::MultiBzDecoder;

use crate::compression::constants::args;
use crate::process::exec::{find_executable_in, ProgramSpec};
use crate::process::pipe::{spawn_pipe_writer, Downstream};
use crate::stream::closer::{BoxReadCloser, BoxWriteCloser, Close, ReadCloser};
use crate::types::Result;

/// Decompress from `source`. The decoder itself holds nothing to release;
/// closing only closes `source`.
pub fn bzip2_reader(source: BoxReadCloser) -> BoxReadCloser {
    ReadCloser::with_action(MultiBzDecoder::new(source), |decoder: MultiBzDecoder<BoxReadCloser>| {
        decoder.into_inner().close()
    })
    .boxed()
}

/// Compress into `sink` with `bzip2 -z -c`, looked up in `dirs`.
pub fn bzip2_writer<P: AsRef<std::path::Path>>(sink: Downstream, dirs: &[P]) -> Result<BoxWriteCloser> {
    let program = find_executable_in("bzip2", dirs)?;
    let spec = ProgramSpec::new(program).args(args::BZIP2_COMPRESS.iter().copied());
    Ok(spawn_pipe_writer(sink, &spec)?.boxed())
}
