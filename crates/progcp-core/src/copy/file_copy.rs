use std::fs;
use std::path::{Path, PathBuf};

use super::chunked::chunked_copy_file;
use super::stats::{CopyKind, CopySummary};
use crate::buffer::ChunkSize;
use crate::errors::{CopyError, CopyResult};
use crate::progress::{ProgressReporter, ProgressScope};

/// Copy the regular file `src` to `dst_folder/<file name>`, overwriting any
/// existing file of that name.
///
/// `dst_folder` must already exist and be a directory. Progress is reported
/// against the size observed when the source is stat'ed.
pub fn copy_file_into(
    src: &Path,
    dst_folder: &Path,
    chunk: ChunkSize,
    reporter: &mut dyn ProgressReporter,
) -> CopyResult<CopySummary> {
    ensure_directory(dst_folder)?;

    let metadata = fs::metadata(src).map_err(|err| {
        log::debug!("stat {} failed: {}", src.display(), err);
        CopyError::invalid_source(src)
    })?;
    if !metadata.is_file() {
        return Err(CopyError::invalid_source(src));
    }
    let name = src
        .file_name()
        .ok_or_else(|| CopyError::invalid_source(src))?;

    let dst = dst_folder.join(name);
    if same_file(src, &dst) {
        return Err(CopyError::invalid_destination(
            &dst,
            "source and destination are the same file",
        ));
    }

    let total = metadata.len();
    let label = name.to_string_lossy();
    let mut summary = CopySummary::new(CopyKind::File, total);

    let mut progress = ProgressScope::begin(reporter, total, &label);
    let copied = chunked_copy_file(src, &dst, chunk, &mut progress)?;
    summary.add_file(copied);

    if copied != total {
        log::warn!(
            "{} changed during copy: expected {} bytes, copied {}",
            src.display(),
            total,
            copied
        );
    }
    Ok(summary)
}

/// Fail with `InvalidDestination` unless `path` is an existing directory.
pub(crate) fn ensure_directory(path: &Path) -> CopyResult<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CopyError::invalid_destination(path, "not a directory")),
        Err(err) => Err(CopyError::invalid_destination(path, err.to_string())),
    }
}

/// Both paths exist and resolve to the same filesystem object.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    match (canonical(a), canonical(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

pub(crate) fn canonical(path: &Path) -> Option<PathBuf> {
    fs::canonicalize(path).ok()
}
