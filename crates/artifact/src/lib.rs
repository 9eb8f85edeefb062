//! Local installer artifact handling.
//!
//! Finds the newest downloaded installer matching a file-name pattern and
//! computes its SHA-256 fingerprint without loading the whole file.

pub mod digest;
pub mod locate;

pub use digest::{DIGEST_CHUNK_SIZE, sha256_bytes, sha256_file, sha256_file_chunked, sha256_reader};
pub use locate::{LocalArtifact, find_latest};

use std::path::PathBuf;

/// Errors from artifact operations.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid file pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },
}

/// Returns the user's download folder.
///
/// `$HOME/Downloads` (or `%USERPROFILE%\Downloads` on Windows). Falls back
/// to a relative `Downloads` when no home directory is known.
pub fn default_download_dir() -> PathBuf {
    home_dir()
        .map(|home| home.join("Downloads"))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
