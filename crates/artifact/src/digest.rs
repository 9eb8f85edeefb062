use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::ArtifactError;

/// Read buffer size used when hashing files.
pub const DIGEST_CHUNK_SIZE: usize = 8192;

/// Computes SHA-256 of `data` and returns the hex-encoded digest.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Computes SHA-256 of a file, reading [`DIGEST_CHUNK_SIZE`] bytes at a time.
pub fn sha256_file(path: &Path) -> Result<String, ArtifactError> {
    sha256_file_chunked(path, DIGEST_CHUNK_SIZE)
}

/// Computes SHA-256 of a file with an explicit read buffer size.
///
/// A `chunk_size` of 0 falls back to [`DIGEST_CHUNK_SIZE`].
pub fn sha256_file_chunked(path: &Path, chunk_size: usize) -> Result<String, ArtifactError> {
    let file = std::fs::File::open(path)?;
    sha256_reader(file, chunk_size)
}

/// Streams `reader` through SHA-256 and returns the hex-encoded digest.
pub fn sha256_reader<R: Read>(mut reader: R, chunk_size: usize) -> Result<String, ArtifactError> {
    let chunk_size = if chunk_size == 0 {
        DIGEST_CHUNK_SIZE
    } else {
        chunk_size
    };
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
