mod chunked;
mod file_copy;
mod stats;
mod tree;

pub use chunked::{chunked_copy_file, copy_stream};
pub use file_copy::copy_file_into;
pub(crate) use file_copy::{canonical, ensure_directory, same_file};
pub use stats::{CopyKind, CopySummary};
pub use tree::copy_tree;
