use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::buffer::ChunkSize;
use crate::errors::{CopyResult, IoContext};
use crate::progress::ProgressScope;

/// Copy `src` to `dst` (truncating or creating it) in `chunk`-sized blocks,
/// advancing `progress` after each block is written.
///
/// Errors abort immediately; a partially written destination is left behind.
pub fn chunked_copy_file(
    src: &Path,
    dst: &Path,
    chunk: ChunkSize,
    progress: &mut ProgressScope<'_>,
) -> CopyResult<u64> {
    let mut reader = File::open(src).io_context("open", src)?;
    let mut writer = File::create(dst).io_context("create", dst)?;
    let copied = copy_stream(&mut reader, &mut writer, chunk, progress, src, dst)?;
    log::debug!("copied {} -> {} ({} bytes)", src.display(), dst.display(), copied);
    Ok(copied)
}

/// Stream `reader` into `writer` one chunk at a time. The paths are only used
/// to label errors.
pub fn copy_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    chunk: ChunkSize,
    progress: &mut ProgressScope<'_>,
    src: &Path,
    dst: &Path,
) -> CopyResult<u64> {
    let mut buffer = vec![0u8; chunk.get()];
    let mut total = 0u64;

    loop {
        let n = read_chunk(reader, &mut buffer).io_context("read", src)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n]).io_context("write", dst)?;
        total += n as u64;
        progress.advance(n as u64);
    }

    writer.flush().io_context("flush", dst)?;
    Ok(total)
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
