use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use walkdir::WalkDir;

use super::Roster;
use crate::parsers::{parse_character_file, parse_roster_file};
use crate::utils::validate_path_not_symlink;

/// Maximum number of character files read from a roster directory (prevent resource exhaustion)
const MAX_CHARACTER_FILES: usize = 10_000;

/// Roster directories may group characters one level deep (e.g. by campaign)
const MAX_DIRECTORY_DEPTH: usize = 2;

/// Load a roster from a file or a directory of character files
///
/// A file is parsed according to its extension (see [`parse_roster_file`]). A directory is
/// scanned with [`discover_character_files`] and every `*.json` file is read as a single
/// character, in file-name order.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist
/// - The roster file fails to parse (see [`crate::parsers`] thresholds)
/// - More than 50% of the character files in a directory fail to parse
/// - A directory holds more than [`MAX_CHARACTER_FILES`] character files
///
/// Individual unreadable character files are logged as warnings and skipped.
pub fn load_roster(path: &Path) -> Result<Roster> {
    if !path.exists() {
        bail!("Roster not found: {}", path.display());
    }

    if !path.is_dir() {
        let characters = parse_roster_file(path)?;
        info!("Loaded {} characters from {}", characters.len(), path.display());
        return Ok(Roster::new(characters).with_source(path));
    }

    let files = discover_character_files(path)?;
    let mut roster = Roster::default().with_source(path);
    let mut failed = 0;

    for file in &files {
        match parse_character_file(file) {
            Ok(character) => roster.push(character),
            Err(e) => {
                failed += 1;
                warn!("Skipping character file {}: {:#}", file.display(), e);
            }
        }
    }

    if !files.is_empty() {
        let failure_rate = failed as f64 / files.len() as f64;
        if failure_rate > 0.5 {
            bail!(
                "Roster loading failed: {}/{} character files failed to parse ({}% failure rate)",
                failed,
                files.len(),
                (failure_rate * 100.0) as u32
            );
        }
    }

    info!(
        "Loaded {} characters from {} ({} files skipped)",
        roster.len(),
        path.display(),
        failed
    );

    Ok(roster)
}

/// Find `*.json` character files below `dir`, sorted by path
///
/// Symlinks are skipped. Returns an empty Vec for an empty directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked or holds more than
/// [`MAX_CHARACTER_FILES`] character files.
pub fn discover_character_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(MAX_DIRECTORY_DEPTH)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to read roster directory: {}", dir.display()))?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            continue;
        }

        let is_json = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if !is_json {
            continue;
        }

        if let Err(e) = validate_path_not_symlink(path) {
            warn!("Skipping character file: {}", e);
            continue;
        }

        if files.len() >= MAX_CHARACTER_FILES {
            bail!(
                "Resource limit exceeded: {} holds more than {} character files",
                dir.display(),
                MAX_CHARACTER_FILES
            );
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}
