use std::borrow::Cow;
use std::env;
use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result, bail};

// Maximum size for a single roster or character file: 10MB
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Rejects symlinks so a roster directory cannot pull in files from elsewhere
///
/// # Errors
///
/// Returns an error if the path metadata cannot be read or the path is a symlink.
pub fn validate_path_not_symlink(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?;

    if metadata.file_type().is_symlink() {
        bail!("Symlinks are not allowed: {}", path.display());
    }

    Ok(())
}

/// Validates that a file's size is within acceptable limits (10MB)
///
/// Takes an open file handle so the size check and the subsequent read see the same file.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than 10MB
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Opens a roster file after checking it is a regular file within the size limit
pub fn open_roster_file(path: &Path) -> Result<File> {
    validate_path_not_symlink(path)?;
    let file = File::open(path)
        .with_context(|| format!("Failed to open roster file: {}", path.display()))?;
    validate_file_size(&file, path)?;
    Ok(file)
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use medieval_character_manager::format_path_with_tilde;
///
/// let path = PathBuf::from("/home/alice/roster.json");
/// // Returns "~/roster.json" if HOME=/home/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
