//! Installer lookup in the download folder.
//!
//! Scans a single directory (no recursion) for regular files whose name
//! matches a glob pattern and keeps the most recently modified one.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::ArtifactError;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// A local installer file selected for publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArtifact {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    pub modified: SystemTime,
}

impl LocalArtifact {
    /// File size in MiB, as shown to the operator.
    pub fn size_mib(&self) -> f64 {
        self.size as f64 / BYTES_PER_MIB
    }
}

/// Returns the newest file in `dir` whose name matches `pattern`.
///
/// `Ok(None)` means nothing matched, including when `dir` does not exist.
/// Ties on modification time resolve to whichever candidate the directory
/// listing yields last.
pub fn find_latest(dir: &Path, pattern: &str) -> Result<Option<LocalArtifact>, ArtifactError> {
    let matcher = Pattern::new(pattern).map_err(|e| ArtifactError::Pattern {
        pattern: pattern.to_string(),
        reason: e.msg.to_string(),
    })?;

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "download directory missing");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut latest: Option<LocalArtifact> = None;

    for entry in entries {
        let entry = entry?;
        let raw_name = entry.file_name();
        let name = raw_name.to_string_lossy();
        if raw_name.to_str().is_none() {
            debug!(file = %name, "file name is not valid UTF-8, matching lossily");
        }
        if !matcher.matches_with(&name, options) {
            continue;
        }

        let path = entry.path();
        // Follows symlinks; a dangling link is skipped.
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(file = %name, "dangling link skipped");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            debug!(file = %name, "not a regular file, skipped");
            continue;
        }

        let candidate = LocalArtifact {
            path,
            file_name: name.into_owned(),
            size: metadata.len(),
            modified: metadata.modified()?,
        };
        debug!(file = %candidate.file_name, size = candidate.size, "candidate installer");

        match &latest {
            Some(current) if current.modified > candidate.modified => {}
            _ => latest = Some(candidate),
        }
    }

    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    const PATTERN: &str = "ATAcct680398*.msi";

    fn write_with_mtime(dir: &Path, name: &str, content: &[u8], age_secs: u64) {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        let file = fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(mtime).unwrap();
    }

    #[test]
    fn picks_newest_match() {
        let dir = TempDir::new().unwrap();
        write_with_mtime(dir.path(), "ATAcct680398_old.msi", b"OLD", 3600);
        write_with_mtime(dir.path(), "ATAcct680398_new.msi", b"NEWEST", 10);
        write_with_mtime(dir.path(), "ATAcct680398_mid.msi", b"MID", 600);

        let found = find_latest(dir.path(), PATTERN).unwrap().unwrap();
        assert_eq!(found.file_name, "ATAcct680398_new.msi");
        assert_eq!(found.size, 6);
        assert_eq!(found.path, dir.path().join("ATAcct680398_new.msi"));
    }

    #[test]
    fn ignores_non_matching_files() {
        let dir = TempDir::new().unwrap();
        write_with_mtime(dir.path(), "ATAcct680398_a.msi", b"A", 600);
        // Newer, but none of these match the pattern.
        write_with_mtime(dir.path(), "ATAcct680398_b.exe", b"B", 1);
        write_with_mtime(dir.path(), "OtherAcct_c.msi", b"C", 1);
        write_with_mtime(dir.path(), "atacct680398_d.msi", b"D", 1);

        let found = find_latest(dir.path(), PATTERN).unwrap().unwrap();
        assert_eq!(found.file_name, "ATAcct680398_a.msi");
    }

    #[test]
    fn bare_prefix_matches() {
        let dir = TempDir::new().unwrap();
        write_with_mtime(dir.path(), "ATAcct680398.msi", b"X", 5);

        let found = find_latest(dir.path(), PATTERN).unwrap().unwrap();
        assert_eq!(found.file_name, "ATAcct680398.msi");
    }

    #[test]
    fn skips_matching_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("ATAcct680398_dir.msi")).unwrap();

        assert!(find_latest(dir.path(), PATTERN).unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_installer() {
        let real = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();
        fs::write(real.path().join("build.msi"), b"LINKED").unwrap();
        std::os::unix::fs::symlink(
            real.path().join("build.msi"),
            dir.path().join("ATAcct680398_link.msi"),
        )
        .unwrap();

        let found = find_latest(dir.path(), PATTERN).unwrap().unwrap();
        assert_eq!(found.file_name, "ATAcct680398_link.msi");
        assert_eq!(found.size, 6);
    }

    #[cfg(unix)]
    #[test]
    fn skips_dangling_symlink() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("gone.msi"),
            dir.path().join("ATAcct680398_dangling.msi"),
        )
        .unwrap();

        assert!(find_latest(dir.path(), PATTERN).unwrap().is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn matches_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"ATAcct680398_\xff.msi");
        fs::write(dir.path().join(name), b"BYTES").unwrap();

        let found = find_latest(dir.path(), PATTERN).unwrap().unwrap();
        assert_eq!(found.path, dir.path().join(name));
        assert!(found.file_name.starts_with("ATAcct680398_"));
        assert_eq!(found.size, 5);
    }

    #[test]
    fn empty_dir_is_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(find_latest(dir.path(), PATTERN).unwrap().is_none());
    }

    #[test]
    fn missing_dir_is_not_found() {
        let result = find_latest(Path::new("/nonexistent/path/that/does/not/exist"), PATTERN);
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn invalid_pattern_is_error() {
        let dir = TempDir::new().unwrap();
        let err = find_latest(dir.path(), "ATAcct[.msi").unwrap_err();
        assert!(matches!(err, ArtifactError::Pattern { .. }));
    }

    #[test]
    fn size_mib_two_decimals() {
        let artifact = LocalArtifact {
            path: PathBuf::from("x.msi"),
            file_name: "x.msi".into(),
            size: 3 * 1024 * 1024 + 512 * 1024,
            modified: SystemTime::UNIX_EPOCH,
        };
        assert_eq!(format!("{:.2}", artifact.size_mib()), "3.50");
    }
}
