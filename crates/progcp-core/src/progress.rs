//! Progress reporting seam between the copy engine and whatever displays it.
//!
//! The engine only writes to a [`ProgressReporter`]; it never reads progress
//! back. Reporters are driven through a [`ProgressScope`], which finalizes the
//! reporter when dropped so an interactive display is always cleaned up, even
//! when the copy fails part-way.

/// Receives byte-level progress from a running copy.
pub trait ProgressReporter {
    /// Called once before any bytes move, with the pre-scanned total.
    fn initialize(&mut self, total_bytes: u64, label: &str);
    /// Called after each chunk is written.
    fn advance(&mut self, bytes: u64);
    /// Called exactly once when the copy ends, successfully or not.
    fn finalize(&mut self);
}

impl<R: ProgressReporter + ?Sized> ProgressReporter for &mut R {
    fn initialize(&mut self, total_bytes: u64, label: &str) {
        (**self).initialize(total_bytes, label);
    }

    fn advance(&mut self, bytes: u64) {
        (**self).advance(bytes);
    }

    fn finalize(&mut self) {
        (**self).finalize();
    }
}

/// Reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn initialize(&mut self, _total_bytes: u64, _label: &str) {}
    fn advance(&mut self, _bytes: u64) {}
    fn finalize(&mut self) {}
}

/// Reporter that remembers every call; handy for tests and for callers that
/// want to inspect what a copy reported after the fact.
#[derive(Debug, Default, Clone)]
pub struct RecordingProgress {
    pub total: Option<u64>,
    pub label: Option<String>,
    pub advances: Vec<u64>,
    pub finalized: usize,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copied(&self) -> u64 {
        self.advances.iter().sum()
    }
}

impl ProgressReporter for RecordingProgress {
    fn initialize(&mut self, total_bytes: u64, label: &str) {
        self.total = Some(total_bytes);
        self.label = Some(label.to_owned());
    }

    fn advance(&mut self, bytes: u64) {
        self.advances.push(bytes);
    }

    fn finalize(&mut self) {
        self.finalized += 1;
    }
}

/// Live progress state for one copy operation: fixed total, monotonically
/// increasing copied count. Finalizes the reporter on drop.
pub struct ProgressScope<'a> {
    reporter: &'a mut dyn ProgressReporter,
    total: u64,
    copied: u64,
}

impl<'a> ProgressScope<'a> {
    pub fn begin(reporter: &'a mut dyn ProgressReporter, total: u64, label: &str) -> Self {
        reporter.initialize(total, label);
        Self {
            reporter,
            total,
            copied: 0,
        }
    }

    /// Record `bytes` more copied. Zero-length updates are dropped.
    pub fn advance(&mut self, bytes: u64) {
        if bytes == 0 {
            return;
        }
        self.copied = self.copied.saturating_add(bytes);
        self.reporter.advance(bytes);
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn copied(&self) -> u64 {
        self.copied
    }
}

impl Drop for ProgressScope<'_> {
    fn drop(&mut self) {
        if self.copied != self.total {
            log::debug!(
                "progress ended at {} of {} bytes",
                self.copied,
                self.total
            );
        }
        self.reporter.finalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_initializes_and_finalizes_once() {
        let mut recorder = RecordingProgress::new();
        {
            let mut scope = ProgressScope::begin(&mut recorder, 10, "data.bin");
            scope.advance(4);
            scope.advance(6);
            assert_eq!(scope.copied(), 10);
            assert_eq!(scope.total(), 10);
        }
        assert_eq!(recorder.total, Some(10));
        assert_eq!(recorder.label.as_deref(), Some("data.bin"));
        assert_eq!(recorder.advances, vec![4, 6]);
        assert_eq!(recorder.finalized, 1);
    }

    #[test]
    fn test_zero_advance_is_not_reported() {
        let mut recorder = RecordingProgress::new();
        {
            let mut scope = ProgressScope::begin(&mut recorder, 0, "empty");
            scope.advance(0);
        }
        assert!(recorder.advances.is_empty());
        assert_eq!(recorder.finalized, 1);
    }

    #[test]
    fn test_finalizes_on_early_return() {
        fn failing(reporter: &mut dyn ProgressReporter) -> Result<(), &'static str> {
            let mut scope = ProgressScope::begin(reporter, 100, "partial");
            scope.advance(50);
            Err("boom")
        }

        let mut recorder = RecordingProgress::new();
        assert!(failing(&mut recorder).is_err());
        assert_eq!(recorder.copied(), 50);
        assert_eq!(recorder.finalized, 1);
    }
}
