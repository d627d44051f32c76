//! Chunk sizing for streamed copies.

use std::fmt;
use std::str::FromStr;

const KB: usize = 1024;
const MB: usize = 1024 * KB;
const GB: usize = 1024 * MB;

/// Number of bytes moved per read/write call. Between one byte and
/// [`ChunkSize::MAX_BYTES`]; the whole chunk is allocated up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSize(usize);

impl ChunkSize {
    pub const DEFAULT_BYTES: usize = MB;
    pub const MAX_BYTES: usize = GB;

    /// Returns `None` for a zero-byte chunk or one above `MAX_BYTES`.
    pub fn new(bytes: usize) -> Option<Self> {
        (bytes > 0 && bytes <= Self::MAX_BYTES).then_some(Self(bytes))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self(Self::DEFAULT_BYTES)
    }
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        if bytes % GB == 0 {
            write!(f, "{}G", bytes / GB)
        } else if bytes % MB == 0 {
            write!(f, "{}M", bytes / MB)
        } else if bytes % KB == 0 {
            write!(f, "{}K", bytes / KB)
        } else {
            write!(f, "{}", bytes)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChunkSizeError(String);

impl fmt::Display for ParseChunkSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseChunkSizeError {}

impl FromStr for ChunkSize {
    type Err = ParseChunkSizeError;

    /// Accepts a byte count with an optional binary suffix: `4096`, `64K`,
    /// `64KiB`, `1M`, `2MB`, `1G`. Suffixes are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, suffix) = trimmed.split_at(split);
        if digits.is_empty() {
            return Err(ParseChunkSizeError(format!("invalid chunk size '{s}'")));
        }

        let multiplier = match suffix.trim().to_ascii_lowercase().as_str() {
            "" | "b" => 1,
            "k" | "kb" | "kib" => KB,
            "m" | "mb" | "mib" => MB,
            "g" | "gb" | "gib" => GB,
            other => {
                return Err(ParseChunkSizeError(format!(
                    "unknown size suffix '{other}' in '{s}'"
                )))
            }
        };

        let value: usize = digits
            .parse()
            .map_err(|_| ParseChunkSizeError(format!("invalid chunk size '{s}'")))?;
        let too_large = || {
            ParseChunkSizeError(format!(
                "chunk size '{s}' is too large (maximum {})",
                ChunkSize(ChunkSize::MAX_BYTES)
            ))
        };
        let bytes = value.checked_mul(multiplier).ok_or_else(too_large)?;
        if bytes == 0 {
            return Err(ParseChunkSizeError(
                "chunk size must be greater than zero".into(),
            ));
        }
        ChunkSize::new(bytes).ok_or_else(too_large)
    }
}
