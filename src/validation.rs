use crate::error::{OptimizerError, Result};
use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::Path;

/// Validate a local source image: it must exist, be readable and be non-empty.
///
/// The checks run in that order and stop at the first failure. Returns the
/// file size in bytes.
pub fn validate_source_file(path: &Path) -> Result<u64> {
    if !path.exists() {
        return Err(OptimizerError::FileNotFound(path.to_path_buf()));
    }

    let metadata =
        fs::metadata(path).map_err(|_| OptimizerError::FileNotReadable(path.to_path_buf()))?;

    // Directories and other non-regular files cannot be uploaded
    if !metadata.is_file() {
        return Err(OptimizerError::FileNotReadable(path.to_path_buf()));
    }

    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => OptimizerError::FileNotFound(path.to_path_buf()),
        _ => OptimizerError::FileNotReadable(path.to_path_buf()),
    })?;

    if metadata.len() == 0 {
        return Err(OptimizerError::EmptyFile(path.to_path_buf()));
    }

    Ok(metadata.len())
}

/// Validate that the output path can be written without creating directories.
pub fn validate_output_path(path: &Path) -> Result<()> {
    if path.file_name().is_none() {
        return Err(OptimizerError::Io(io::Error::new(
            ErrorKind::InvalidInput,
            format!("output path has no file name: {}", path.display()),
        )));
    }

    if path.is_dir() {
        return Err(OptimizerError::Io(io::Error::new(
            ErrorKind::InvalidInput,
            format!("output path is a directory: {}", path.display()),
        )));
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(OptimizerError::Io(io::Error::new(
                ErrorKind::NotFound,
                format!("output directory does not exist: {}", parent.display()),
            )))
        }
        _ => Ok(()),
    }
}
