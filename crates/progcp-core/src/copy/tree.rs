use std::fs;
use std::path::Path;

use super::chunked::chunked_copy_file;
use super::stats::{CopyKind, CopySummary};
use crate::buffer::ChunkSize;
use crate::enumeration::{EntryKind, FileEnumerator};
use crate::errors::{CopyResult, IoContext};
use crate::progress::{ProgressReporter, ProgressScope};

/// Mirror the contents of `src_dir` into `dst_dir`, which the caller has
/// already created.
///
/// Runs two passes over the source: the first sums file sizes for the
/// progress total, the second creates missing directories and copies files.
/// If the tree changes between the passes the copied byte count can diverge
/// from the total; that race is not guarded against.
pub fn copy_tree(
    src_dir: &Path,
    dst_dir: &Path,
    chunk: ChunkSize,
    label: &str,
    reporter: &mut dyn ProgressReporter,
) -> CopyResult<CopySummary> {
    let enumerator = FileEnumerator::new();
    let total = enumerator.scan_total_bytes(src_dir)?;
    let mut summary = CopySummary::new(CopyKind::Directory, total);

    let mut progress = ProgressScope::begin(reporter, total, label);
    enumerator.enumerate_local_streaming(src_dir, |entry| {
        let target = dst_dir.join(&entry.relative_path);
        match entry.kind {
            EntryKind::Directory => {
                if !target.exists() {
                    fs::create_dir_all(&target).io_context("create directory", &target)?;
                    summary.add_dir();
                }
            }
            EntryKind::File { .. } => {
                let copied =
                    chunked_copy_file(&entry.absolute_path, &target, chunk, &mut progress)?;
                summary.add_file(copied);
            }
        }
        Ok(())
    })?;

    if summary.bytes_copied != total {
        log::warn!(
            "{} changed during copy: pre-scan found {} bytes, copied {}",
            src_dir.display(),
            total,
            summary.bytes_copied
        );
    }
    Ok(summary)
}
