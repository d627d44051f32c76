use std::time::Duration;

/// Which shape of copy ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyKind {
    #[default]
    File,
    Directory,
}

/// Summary of a finished copy.
#[derive(Debug, Clone, Default)]
pub struct CopySummary {
    pub kind: CopyKind,
    pub files_copied: u64,
    pub dirs_created: u64,
    pub bytes_copied: u64,
    /// Pre-scanned total. Differs from `bytes_copied` only when the source
    /// changed while the copy ran.
    pub total_bytes: u64,
    pub duration: Duration,
}

impl CopySummary {
    pub fn new(kind: CopyKind, total_bytes: u64) -> Self {
        Self {
            kind,
            total_bytes,
            ..Self::default()
        }
    }

    pub fn add_file(&mut self, bytes: u64) {
        self.files_copied += 1;
        self.bytes_copied += bytes;
    }

    pub fn add_dir(&mut self) {
        self.dirs_created += 1;
    }

    /// Bytes per second over the recorded duration, or zero when no time
    /// was measured.
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.bytes_copied as f64 / secs
        } else {
            0.0
        }
    }
}
