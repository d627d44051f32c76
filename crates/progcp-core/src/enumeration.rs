use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{CopyError, CopyResult};

/// Describes the kind of entry returned by the enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File { size: u64 },
    Directory,
}

/// Result of filesystem enumeration. `absolute_path` is the path on disk,
/// `relative_path` is the path relative to the enumeration root.
#[derive(Debug, Clone)]
pub struct EnumeratedEntry {
    pub absolute_path: PathBuf,
    pub relative_path: PathBuf,
    pub kind: EntryKind,
}

/// Recursive walker used by both the size pre-scan and the copy pass, so the
/// two passes agree on which entries count.
///
/// Entries are visited in file-name order within each directory. Symlinks
/// are not followed: a link to a regular file is reported as a file carrying
/// the target's size, a link to a directory as an (empty) directory. A link
/// whose target cannot be stat'ed is an error. Special files are skipped.
#[derive(Debug, Clone, Default)]
pub struct FileEnumerator;

impl FileEnumerator {
    pub fn new() -> Self {
        Self
    }

    /// Enumerate entries beneath `root`, excluding `root` itself.
    pub fn enumerate_local(&self, root: &Path) -> CopyResult<Vec<EnumeratedEntry>> {
        let mut results = Vec::new();
        self.enumerate_local_streaming(root, |entry| {
            results.push(entry);
            Ok(())
        })?;
        Ok(results)
    }

    /// Enumerate entries and invoke `visit` for each discovered item. The
    /// first walk error aborts the enumeration.
    pub fn enumerate_local_streaming<F>(&self, root: &Path, mut visit: F) -> CopyResult<()>
    where
        F: FnMut(EnumeratedEntry) -> CopyResult<()>,
    {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .min_depth(1);

        for next in walker {
            let entry = next.map_err(|err| {
                let path = err.path().unwrap_or(root).to_path_buf();
                CopyError::io("walk", path, err.into())
            })?;
            let path = entry.path();
            let file_type = entry.file_type();

            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                let metadata = entry
                    .metadata()
                    .map_err(|err| CopyError::io("stat", path, err.into()))?;
                EntryKind::File {
                    size: metadata.len(),
                }
            } else if file_type.is_symlink() {
                let target =
                    fs::metadata(path).map_err(|err| CopyError::io("stat", path, err))?;
                if target.is_file() {
                    EntryKind::File { size: target.len() }
                } else if target.is_dir() {
                    EntryKind::Directory
                } else {
                    log::warn!("skipping symlink to special file {}", path.display());
                    continue;
                }
            } else {
                log::warn!("skipping special file {}", path.display());
                continue;
            };

            visit(EnumeratedEntry {
                absolute_path: path.to_path_buf(),
                relative_path: relative_path(root, path),
                kind,
            })?;
        }

        Ok(())
    }

    /// Sum the sizes of every file the enumerator would visit.
    pub fn scan_total_bytes(&self, root: &Path) -> CopyResult<u64> {
        let mut total = 0u64;
        let mut files = 0usize;
        self.enumerate_local_streaming(root, |entry| {
            if let EntryKind::File { size } = entry.kind {
                total = total.saturating_add(size);
                files += 1;
            }
            Ok(())
        })?;
        log::debug!(
            "pre-scan of {}: {} file(s), {} bytes",
            root.display(),
            files,
            total
        );
        Ok(total)
    }
}

fn relative_path(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => PathBuf::from(path),
    }
}
