//! xz: both directions run the external `xz` program.

use std::path::Path;

use crate::compression::constants::args;
use crate::process::exec::{find_executable_in, ProgramSpec};
use crate::process::pipe::{spawn_pipe_reader, spawn_pipe_writer, Downstream, Upstream};
use crate::stream::closer::{BoxReadCloser, BoxWriteCloser};
use crate::types::Result;

/// Compress into `sink` with `xz -z -e -c`.
pub fn xz_writer<P: AsRef<Path>>(sink: Downstream, dirs: &[P]) -> Result<BoxWriteCloser> {
    let spec = xz_spec(dirs, args::XZ_COMPRESS)?;
    Ok(spawn_pipe_writer(sink, &spec)?.boxed())
}

/// Decompress from `source` with `xz -d -c`.
pub fn xz_reader<P: AsRef<Path>>(source: Upstream, dirs: &[P]) -> Result<BoxReadCloser> {
    let spec = xz_spec(dirs, args::XZ_DECOMPRESS)?;
    Ok(spawn_pipe_reader(source, &spec)?.boxed())
}

fn xz_spec<P: AsRef<Path>>(dirs: &[P], flags: &[&str]) -> Result<ProgramSpec> {
    let program = find_executable_in("xz", dirs)?;
    Ok(ProgramSpec::new(program).args(flags.iter().copied()))
}
