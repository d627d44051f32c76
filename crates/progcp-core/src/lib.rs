pub mod buffer;
pub mod copy;
pub mod enumeration;
pub mod errors;
pub mod orchestrator;
pub mod progress;

use std::path::Path;

pub use buffer::ChunkSize;
pub use copy::{CopyKind, CopySummary};
pub use errors::{CopyError, CopyErrorKind, CopyResult};
pub use orchestrator::CopyTask;
pub use progress::{NoProgress, ProgressReporter, RecordingProgress};

#[derive(Clone, Debug, Default)]
pub struct CopyConfig {
    pub chunk_size: ChunkSize,
}

/// Copy a file or directory at `source` into the folder `destination`,
/// reporting byte progress to `reporter`.
pub fn copy_with_progress(
    source: &Path,
    destination: &Path,
    config: &CopyConfig,
    reporter: &mut dyn ProgressReporter,
) -> CopyResult<CopySummary> {
    CopyTask::new(source, destination)
        .with_chunk_size(config.chunk_size)
        .execute(reporter)
}
