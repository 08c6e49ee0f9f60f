use crate::constants::OPTIMIZED_PREFIX;
use crate::error::Result;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default output location for a local source: `<dir>/optimized-<basename>`.
///
/// # Example
/// ```
/// use std::path::{Path, PathBuf};
/// use img_optimizer::derive_output_path;
///
/// assert_eq!(
///     derive_output_path(Path::new("/tmp/photo.jpg")),
///     PathBuf::from("/tmp/optimized-photo.jpg")
/// );
/// ```
pub fn derive_output_path(source: &Path) -> PathBuf {
    // Stay in OsString so non-UTF-8 names survive unchanged
    let mut optimized = OsString::from(OPTIMIZED_PREFIX);
    optimized.push(source.file_name().unwrap_or_default());

    match source.parent() {
        Some(parent) => parent.join(optimized),
        None => PathBuf::from(optimized),
    }
}

/// Writes the artifact to `path`, replacing any existing file.
///
/// Bytes go to a temporary file next to the target which is then renamed
/// over it, so a failure never leaves an empty or partial output behind.
/// Parent directories are not created. An existing target keeps its
/// permissions; a new one is created as `0o644` on unix.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> Result<u64> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;

    match fs::metadata(path) {
        Ok(existing) => temp.as_file().set_permissions(existing.permissions())?,
        #[cfg(unix)]
        Err(_) => {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))?;
        }
        #[cfg(not(unix))]
        Err(_) => {}
    }

    temp.persist(path).map_err(|e| e.error)?;

    Ok(bytes.len() as u64)
}
