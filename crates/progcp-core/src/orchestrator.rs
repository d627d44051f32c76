use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::buffer::ChunkSize;
use crate::copy::{self, CopySummary};
use crate::errors::{CopyError, CopyResult, IoContext};
use crate::progress::ProgressReporter;

/// One copy invocation: what to copy, where to put it, and how big each
/// transfer chunk is. Immutable once built.
#[derive(Debug, Clone)]
pub struct CopyTask {
    source: PathBuf,
    destination: PathBuf,
    chunk_size: ChunkSize,
}

impl CopyTask {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            chunk_size: ChunkSize::default(),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: ChunkSize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Classify the source and run the matching copy.
    ///
    /// - regular file: copied to `destination/<name>`
    /// - directory: mirrored into `destination/<name>/`, which is created if
    ///   missing
    /// - anything else: `InvalidSource`
    pub fn execute(&self, reporter: &mut dyn ProgressReporter) -> CopyResult<CopySummary> {
        let start = Instant::now();
        let metadata = fs::metadata(&self.source).map_err(|err| {
            log::debug!("stat {} failed: {}", self.source.display(), err);
            CopyError::invalid_source(&self.source)
        })?;

        let mut summary = if metadata.is_file() {
            log::info!(
                "copying file {} into {}",
                self.source.display(),
                self.destination.display()
            );
            copy::copy_file_into(&self.source, &self.destination, self.chunk_size, reporter)?
        } else if metadata.is_dir() {
            self.copy_directory(reporter)?
        } else {
            return Err(CopyError::invalid_source(&self.source));
        };

        summary.duration = start.elapsed();
        log::info!(
            "copied {} file(s), {} bytes in {:.2?}",
            summary.files_copied,
            summary.bytes_copied,
            summary.duration
        );
        Ok(summary)
    }

    fn copy_directory(&self, reporter: &mut dyn ProgressReporter) -> CopyResult<CopySummary> {
        let name = source_name(&self.source)
            .ok_or_else(|| CopyError::invalid_source(&self.source))?;
        // A missing destination folder is created along with `<name>`.
        if self.destination.exists() {
            copy::ensure_directory(&self.destination)?;
        }

        if let (Some(src), Some(dst)) = (
            copy::canonical(&self.source),
            nearest_existing_canonical(&self.destination),
        ) {
            if dst.starts_with(&src) {
                return Err(CopyError::invalid_destination(
                    &self.destination,
                    "destination is inside the source directory",
                ));
            }
        }

        let target = self.destination.join(&name);
        if copy::same_file(&self.source, &target) {
            return Err(CopyError::invalid_destination(
                &target,
                "source and destination are the same directory",
            ));
        }

        let created = !target.exists();
        if created {
            fs::create_dir_all(&target).io_context("create directory", &target)?;
        }

        log::info!(
            "copying directory {} into {}",
            self.source.display(),
            target.display()
        );
        let label = name.to_string_lossy();
        let mut summary =
            copy::copy_tree(&self.source, &target, self.chunk_size, &label, reporter)?;
        if created {
            summary.add_dir();
        }
        Ok(summary)
    }
}

/// Final path component of `path`, resolving `.`/`..` through the
/// filesystem when the path itself has no name.
fn source_name(path: &Path) -> Option<OsString> {
    if let Some(name) = path.file_name() {
        return Some(name.to_os_string());
    }
    copy::canonical(path)?.file_name().map(|n| n.to_os_string())
}

/// Canonical form of `path`, or of its closest existing ancestor when `path`
/// itself does not exist yet.
fn nearest_existing_canonical(path: &Path) -> Option<PathBuf> {
    path.ancestors().find_map(|ancestor| {
        if ancestor.as_os_str().is_empty() {
            copy::canonical(Path::new("."))
        } else {
            copy::canonical(ancestor)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CopyErrorKind;
    use crate::progress::RecordingProgress;
    use eyre::Result;
    use tempfile::tempdir;

    #[test]
    fn test_directory_lands_under_its_own_name() -> Result<()> {
        let tmp = tempdir()?;
        let src = tmp.path().join("photos");
        let dest = tmp.path().join("backup");
        fs::create_dir_all(src.join("2024"))?;
        fs::create_dir(&dest)?;
        fs::write(src.join("2024/beach.jpg"), b"jpeg-bytes")?;

        let mut recorder = RecordingProgress::new();
        let summary = CopyTask::new(&src, &dest).execute(&mut recorder)?;

        assert_eq!(fs::read(dest.join("photos/2024/beach.jpg"))?, b"jpeg-bytes");
        assert_eq!(summary.kind, copy::CopyKind::Directory);
        assert_eq!(summary.dirs_created, 2);
        assert_eq!(recorder.label.as_deref(), Some("photos"));
        Ok(())
    }

    #[test]
    fn test_missing_source_creates_nothing() -> Result<()> {
        let tmp = tempdir()?;
        let dest = tmp.path().join("dest");
        fs::create_dir(&dest)?;

        let mut recorder = RecordingProgress::new();
        let err = CopyTask::new(tmp.path().join("nope"), &dest)
            .execute(&mut recorder)
            .unwrap_err();

        assert_eq!(err.kind(), CopyErrorKind::InvalidSource);
        assert_eq!(fs::read_dir(&dest)?.count(), 0);
        assert_eq!(recorder.finalized, 0);
        Ok(())
    }

    #[test]
    fn test_directory_into_missing_destination_creates_it() -> Result<()> {
        let tmp = tempdir()?;
        let src = tmp.path().join("src");
        fs::create_dir(&src)?;
        fs::write(src.join("a.txt"), b"alpha")?;
        let dest = tmp.path().join("missing/nested");

        let mut recorder = RecordingProgress::new();
        let summary = CopyTask::new(&src, &dest).execute(&mut recorder)?;

        assert_eq!(fs::read(dest.join("src/a.txt"))?, b"alpha");
        assert_eq!(summary.files_copied, 1);
        assert_eq!(recorder.total, Some(5));
        Ok(())
    }

    #[test]
    fn test_directory_into_file_destination_fails() -> Result<()> {
        let tmp = tempdir()?;
        let src = tmp.path().join("src");
        fs::create_dir(&src)?;
        let dest = tmp.path().join("plain.txt");
        fs::write(&dest, b"not a folder")?;

        let err = CopyTask::new(&src, &dest)
            .execute(&mut RecordingProgress::new())
            .unwrap_err();
        assert_eq!(err.kind(), CopyErrorKind::InvalidDestination);
        assert_eq!(fs::read(&dest)?, b"not a folder");
        Ok(())
    }

    #[test]
    fn test_missing_destination_inside_source_is_rejected() -> Result<()> {
        let tmp = tempdir()?;
        let src = tmp.path().join("src");
        fs::create_dir(&src)?;
        let dest = src.join("not/yet");

        let err = CopyTask::new(&src, &dest)
            .execute(&mut RecordingProgress::new())
            .unwrap_err();
        assert_eq!(err.kind(), CopyErrorKind::InvalidDestination);
        assert!(!src.join("not").exists());
        Ok(())
    }

    #[test]
    fn test_destination_inside_source_is_rejected() -> Result<()> {
        let tmp = tempdir()?;
        let src = tmp.path().join("src");
        let inner = src.join("inner");
        fs::create_dir_all(&inner)?;

        let err = CopyTask::new(&src, &inner)
            .execute(&mut RecordingProgress::new())
            .unwrap_err();
        assert_eq!(err.kind(), CopyErrorKind::InvalidDestination);
        assert!(!inner.join("src").exists());
        Ok(())
    }

    #[test]
    fn test_directory_onto_itself_is_rejected() -> Result<()> {
        let tmp = tempdir()?;
        let src = tmp.path().join("src");
        fs::create_dir(&src)?;
        fs::write(src.join("f.txt"), b"keep")?;

        let err = CopyTask::new(&src, tmp.path())
            .execute(&mut RecordingProgress::new())
            .unwrap_err();
        assert_eq!(err.kind(), CopyErrorKind::InvalidDestination);
        assert_eq!(fs::read(src.join("f.txt"))?, b"keep");
        Ok(())
    }

    #[test]
    fn test_source_name_resolves_dot() -> Result<()> {
        let tmp = tempdir()?;
        let dir = tmp.path().join("named");
        fs::create_dir(&dir)?;
        assert_eq!(source_name(&dir.join(".")), Some(OsString::from("named")));
        assert_eq!(source_name(Path::new("/")), None);
        Ok(())
    }
}
