//! # Input Files
//!
//! Every file the CLI reads (line configs, unit feeds) goes through
//! [`read_validated`], which refuses anything that is not a regular file or
//! is larger than the limit for its kind.

use crate::error::CliError;
use std::path::Path;

/// Largest accepted line configuration file (1 MB).
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Largest accepted unit feed file (100 MB).
pub const MAX_FEED_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a text input file of at most `max_size` bytes.
///
/// The path is resolved first so the size check and the read see the same
/// file, even through symlinks.
pub fn read_validated(path: &Path, max_size: u64) -> Result<String, CliError> {
    let resolved = path
        .canonicalize()
        .map_err(|e| CliError::Io(format!("Cannot open '{}': {}", path.display(), e)))?;

    let metadata = std::fs::metadata(&resolved)
        .map_err(|e| CliError::Io(format!("Cannot stat '{}': {}", path.display(), e)))?;
    if !metadata.is_file() {
        return Err(CliError::Io(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > max_size {
        return Err(CliError::Io(format!(
            "'{}' is {} bytes, over the {} byte limit",
            path.display(),
            metadata.len(),
            max_size
        )));
    }

    std::fs::read_to_string(&resolved)
        .map_err(|e| CliError::Io(format!("Cannot read '{}': {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_small_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"seed = 1\n").expect("write");
        assert_eq!(
            read_validated(file.path(), MAX_CONFIG_FILE_SIZE).expect("read"),
            "seed = 1\n"
        );
    }

    #[test]
    fn rejects_oversized_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(&[b'x'; 64]).expect("write");
        assert!(matches!(
            read_validated(file.path(), 16),
            Err(CliError::Io(msg)) if msg.contains("byte limit")
        ));
    }

    #[test]
    fn rejects_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(matches!(
            read_validated(dir.path(), MAX_FEED_FILE_SIZE),
            Err(CliError::Io(msg)) if msg.contains("not a regular file")
        ));
    }
}
